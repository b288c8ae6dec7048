//! Rendering behavior over growing prefixes of one document, the way the
//! progressive printer calls the renderer during streaming.

use streamdown::{visible_width, MarkdownRenderer, Theme};

const DOCUMENT: &str = "# Sorting in Go\n\nUse the `slices` package:\n\n```go\nslices.Sort(values)\nfmt.Println(values)\n```\n\nThat is **all** you need.\n";

fn renderer() -> MarkdownRenderer {
    MarkdownRenderer::new(Theme::plain()).with_box_widths(10, 40)
}

fn strip(text: &str) -> String {
    streamdown::strip_ansi(text)
}

#[test]
fn every_prefix_renders_without_panicking() {
    let renderer = renderer();
    for (idx, _) in DOCUMENT.char_indices() {
        let _ = renderer.render(&DOCUMENT[..idx]);
    }
    let _ = renderer.render(DOCUMENT);
}

#[test]
fn prefix_inside_fence_body_already_shows_the_box() {
    let renderer = renderer();
    let cut = DOCUMENT.find("slices.Sort").expect("body present") + "slices.Sort".len();
    let out = renderer.render(&DOCUMENT[..cut]);

    assert_eq!(out.matches('╭').count(), 1);
    assert!(out.contains(" go "));
    assert!(strip(&out).contains("slices.Sort"));
}

#[test]
fn prefix_inside_language_tag_stays_literal() {
    let renderer = renderer();
    let cut = DOCUMENT.find("```go").expect("fence present") + 4;
    let out = renderer.render(&DOCUMENT[..cut]);

    assert_eq!(out.matches('╭').count(), 0);
    assert!(out.contains("```g"));
}

#[test]
fn complete_document_renders_one_box_with_even_borders() {
    let out = renderer().render(DOCUMENT);

    assert_eq!(out.matches('╭').count(), 1);
    assert_eq!(out.matches('╰').count(), 1);

    let box_widths: Vec<usize> = out
        .split('\n')
        .filter(|line| {
            line.starts_with('╭') || line.starts_with('│') || line.starts_with('╰')
        })
        .map(visible_width)
        .collect();
    assert!(box_widths.len() >= 4);
    assert!(box_widths.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn rendering_the_same_prefix_twice_is_byte_identical() {
    let renderer = MarkdownRenderer::new(Theme::default_colors());
    for cut in [10, 40, DOCUMENT.len()] {
        let prefix = &DOCUMENT[..cut];
        assert_eq!(renderer.render(prefix), renderer.render(prefix));
    }
}

#[test]
fn unmatched_trailing_fence_adds_one_extra_box_after_its_tag_line() {
    let renderer = renderer();
    let streaming = format!("{DOCUMENT}\n```python\nprint(42)");
    let out = renderer.render(&streaming);

    assert_eq!(out.matches('╭').count(), 2);
    assert!(out.contains(" python "));
}
