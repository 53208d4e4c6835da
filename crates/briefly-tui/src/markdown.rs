//! Markdown to styled terminal lines for the output pane.
//!
//! Summaries come back as light markdown: headings, bullet or numbered
//! lists, emphasis and the odd code span. Anything richer is rendered as
//! its plain text.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::Theme;

/// Render markdown into owned lines ready for a `Paragraph`.
pub fn to_lines(markdown: &str) -> Vec<Line<'static>> {
    let mut renderer = Renderer::default();
    for event in Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH) {
        renderer.push(event);
    }
    renderer.finish()
}

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// One entry per open list: the next number for ordered lists.
    lists: Vec<Option<u64>>,
    in_code_block: bool,
}

impl Renderer {
    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => {
                for line in text.lines() {
                    self.lines.push(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(line.to_string(), Theme::code()),
                    ]));
                }
            }
            Event::Text(text) => {
                let style = self.style();
                self.current.push(Span::styled(text.into_string(), style));
            }
            Event::Code(code) => {
                self.current
                    .push(Span::styled(code.into_string(), Theme::code()));
            }
            Event::SoftBreak => self.current.push(Span::raw(" ")),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines
                    .push(Line::from(Span::styled("─".repeat(24), Theme::dim())));
                self.blank();
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { .. } => {
                self.flush();
                self.styles.push(Theme::title());
            }
            Tag::Emphasis => self.styles.push(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.styles.push(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self
                .styles
                .push(Style::default().add_modifier(Modifier::CROSSED_OUT)),
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.current.push(Span::raw("  ".repeat(depth)));
                self.current.push(Span::styled(marker, Theme::key_hint()));
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                self.in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.lines
                            .push(Line::from(Span::styled(format!("  {lang}"), Theme::dim())));
                    }
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.flush();
                self.styles.pop();
                self.blank();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Paragraph => {
                self.flush();
                // Tight list items keep their paragraphs together.
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank();
            }
            _ => {}
        }
    }

    fn style(&self) -> Style {
        self.styles
            .iter()
            .fold(Theme::normal(), |acc, style| acc.patch(*style))
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|line| !line.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|line| line.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn texts(markdown: &str) -> Vec<String> {
        to_lines(markdown).iter().map(text).collect()
    }

    #[test]
    fn plain_paragraphs_are_separated_by_a_blank_line() {
        assert_eq!(
            texts("First paragraph\ncontinues.\n\nSecond one."),
            vec!["First paragraph continues.", "", "Second one."]
        );
    }

    #[test]
    fn bullet_list_gets_markers() {
        assert_eq!(
            texts("- alpha\n- beta\n- gamma"),
            vec!["• alpha", "• beta", "• gamma"]
        );
    }

    #[test]
    fn ordered_list_keeps_its_numbering() {
        assert_eq!(texts("3. three\n4. four"), vec!["3. three", "4. four"]);
    }

    #[test]
    fn nested_list_is_indented() {
        assert_eq!(
            texts("- outer\n  - inner"),
            vec!["• outer", "  • inner"]
        );
    }

    #[test]
    fn heading_is_bold_and_followed_by_a_blank_line() {
        let lines = to_lines("## Key points\nBody text.");
        assert_eq!(text(&lines[0]), "Key points");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(text(&lines[1]), "");
        assert_eq!(text(&lines[2]), "Body text.");
    }

    #[test]
    fn strong_text_is_bold() {
        let lines = to_lines("A **very** short summary.");
        let strong = lines[0]
            .spans
            .iter()
            .find(|span| span.content == "very")
            .unwrap();
        assert!(strong.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inline_code_uses_code_style() {
        let lines = to_lines("Call `summarize` now.");
        let code = lines[0]
            .spans
            .iter()
            .find(|span| span.content == "summarize")
            .unwrap();
        assert_eq!(code.style, Theme::code());
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(to_lines("").is_empty());
    }
}
