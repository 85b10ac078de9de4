use criterion::{Criterion, black_box, criterion_group, criterion_main};
use editor_style::{
    Color, ColorScheme, Decoration, DecorationTree, Glyph, Line, LineSplitter, MonospaceShaper,
    PaintBackend, PainterConfig, Palette, Path, Point, PointF, Rect, RectF, TextPainter,
    TextStyle, TextTokens, Token,
};
use std::sync::Arc;

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "fn line_{i:06}(x: u32) -> u32 {{ let y = \"value\"; x + y.len() as u32 }}\n"
        ));
    }
    out.pop();
    out
}

fn scheme() -> Arc<ColorScheme> {
    let mut scheme = ColorScheme::new("bench", Palette::with_foreground(Color::rgb(0xEE, 0xEE, 0xEE)));
    scheme
        .add_style("keyword", TextStyle::BOLD, Color::rgb(0xFF, 0x79, 0xC6), Color::UNSET)
        .unwrap();
    scheme
        .add_style("string", TextStyle::empty(), Color::rgb(0xF1, 0xFA, 0x8C), Color::UNSET)
        .unwrap();
    scheme
        .add_style("entity.name.function", TextStyle::empty(), Color::rgb(0x50, 0xFA, 0x7B), Color::UNSET)
        .unwrap();
    Arc::new(scheme)
}

/// Tokens for every `fn`, `let` and string literal of `text`, in rune offsets.
fn tokens_for(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line_start = 0usize;
    for line in text.split('\n') {
        tokens.push(Token::new(line_start, line_start + 2, "keyword"));
        tokens.push(Token::new(line_start + 3, line_start + 14, "entity.name.function"));
        if let Some(pos) = line.find("let") {
            tokens.push(Token::new(line_start + pos, line_start + pos + 3, "keyword.other"));
        }
        if let Some(pos) = line.find('"') {
            tokens.push(Token::new(line_start + pos, line_start + pos + 7, "string.quoted"));
        }
        line_start += line.chars().count() + 1;
    }
    tokens
}

fn decorations_for(lines: &[Line]) -> DecorationTree {
    let mut tree = DecorationTree::new();
    let decorations = lines.iter().step_by(3).map(|line| {
        Decoration::new("search", line.rune_off + 4, line.rune_off + 12)
            .with_background(Color::rgb(0x44, 0x47, 0x5A))
    });
    tree.insert(decorations).unwrap();
    tree
}

struct NullBackend;

impl PaintBackend for NullBackend {
    fn push_clip(&mut self, rect: Rect) {
        black_box(rect);
    }

    fn pop_clip(&mut self) {}

    fn fill_rect(&mut self, rect: RectF, color: Color) {
        black_box((rect, color));
    }

    fn stroke_path(&mut self, path: &Path, width: f32, color: Color) {
        black_box((path.segments().len(), width, color));
    }

    fn fill_glyphs(&mut self, origin: PointF, glyphs: &[Glyph], style: TextStyle, color: Color) {
        black_box((origin, glyphs.len(), style, color));
    }
}

fn bench_split_line(c: &mut Criterion) {
    let text = large_text(20_000);
    let lines = MonospaceShaper::default().shape(&text);
    let mut tokens = TextTokens::new(scheme());
    tokens.set(tokens_for(&text));
    let tree = decorations_for(&lines);
    let line = &lines[10_000];
    let mut runs = Vec::new();

    c.bench_function("split/syntax_line", |b| {
        b.iter(|| {
            tokens.split(black_box(line), &mut runs);
            black_box(runs.len());
        })
    });

    c.bench_function("split/decoration_line", |b| {
        b.iter(|| {
            tree.split(black_box(line), &mut runs);
            black_box(runs.len());
        })
    });
}

fn bench_paint_frame(c: &mut Criterion) {
    let text = large_text(20_000);
    let shaper = MonospaceShaper::default();
    let lines = shaper.shape(&text);
    let mut tokens = TextTokens::new(scheme());
    tokens.set(tokens_for(&text));
    let tree = decorations_for(&lines);

    // 60 visible lines well into the document.
    let top = 10_000 * shaper.line_height();
    let mut painter = TextPainter::new(PainterConfig::default());
    painter.set_viewport(
        Rect::from_coords(0, top, 1200, top + 60 * shaper.line_height()),
        Point::new(0, 0),
    );

    c.bench_function("paint/60_lines_of_20k", |b| {
        b.iter(|| {
            painter.paint(
                &mut NullBackend,
                black_box(&lines),
                Color::rgb(0xEE, 0xEE, 0xEE),
                Some(&tokens),
                Some(&tree),
            );
        })
    });
}

fn bench_decoration_churn(c: &mut Criterion) {
    let lines = MonospaceShaper::default().shape(&large_text(5_000));
    c.bench_function("decorations/insert_remove_by_source", |b| {
        b.iter(|| {
            let mut tree = decorations_for(&lines);
            tree.insert(lines.iter().step_by(7).map(|line| {
                Decoration::new("lint", line.rune_off, line.rune_off + 2)
                    .with_squiggle(Color::rgb(0xFF, 0x55, 0x55))
            }))
            .unwrap();
            black_box(tree.remove_by_source("search"));
        })
    });
}

criterion_group!(
    benches,
    bench_split_line,
    bench_paint_frame,
    bench_decoration_churn
);
criterion_main!(benches);
