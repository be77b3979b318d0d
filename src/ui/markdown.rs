use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Render question text, which may carry inline Markdown, as styled lines.
///
/// Block markers the text happens to start with (`#`, `2010.`) and raw HTML
/// are kept as written.
pub fn markdown_to_lines(text: &str) -> Vec<Line<'static>> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, opts);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current_spans: Vec<Span<'static>> = Vec::new();
    let mut style_stack: Vec<Style> = vec![Style::default()];
    let mut in_code_block = false;
    let mut list_numbers: Vec<Option<u64>> = Vec::new();

    for event in parser {
        match event {
            Event::End(TagEnd::Paragraph) => {
                flush(&mut lines, &mut current_spans);
                lines.push(Line::from(""));
            }
            Event::Start(Tag::Strong) => push_modifier(&mut style_stack, Modifier::BOLD),
            Event::Start(Tag::Emphasis) => push_modifier(&mut style_stack, Modifier::ITALIC),
            Event::Start(Tag::Strikethrough) => {
                push_modifier(&mut style_stack, Modifier::CROSSED_OUT)
            }
            Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough) => {
                if style_stack.len() > 1 {
                    style_stack.pop();
                }
            }
            Event::Start(Tag::Heading { level, .. }) => {
                flush(&mut lines, &mut current_spans);
                current_spans.push(Span::styled(
                    format!("{} ", "#".repeat(heading_depth(level))),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
            Event::End(TagEnd::Heading(_)) => {
                flush(&mut lines, &mut current_spans);
                lines.push(Line::from(""));
            }
            Event::Start(Tag::BlockQuote(_)) => {
                current_spans.push(Span::styled("> ", Style::default().fg(Color::DarkGray)));
            }
            Event::Start(Tag::List(start)) => list_numbers.push(start),
            Event::End(TagEnd::List(_)) => {
                list_numbers.pop();
            }
            Event::Start(Tag::Item) => {
                flush(&mut lines, &mut current_spans);
                let marker = match list_numbers.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "  • ".to_string(),
                };
                current_spans.push(Span::raw(marker));
            }
            Event::End(TagEnd::Item) => flush(&mut lines, &mut current_spans),
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                lines.push(Line::from(""));
            }
            Event::Text(text) if in_code_block => {
                for code_line in text.lines() {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", code_line),
                        Style::default().fg(Color::Green),
                    )));
                }
            }
            Event::Text(text) => {
                let style = *style_stack.last().unwrap_or(&Style::default());
                current_spans.push(Span::styled(text.to_string(), style));
            }
            Event::Code(code) => {
                current_spans.push(Span::styled(
                    format!("`{}`", code),
                    Style::default().fg(Color::Yellow),
                ));
            }
            Event::SoftBreak => {
                current_spans.push(Span::raw(" "));
            }
            Event::HardBreak => {
                lines.push(Line::from(std::mem::take(&mut current_spans)));
            }
            Event::InlineHtml(html) => {
                current_spans.push(Span::raw(html.to_string()));
            }
            Event::Html(html) => {
                for html_line in html.lines() {
                    current_spans.push(Span::raw(html_line.to_string()));
                    flush(&mut lines, &mut current_spans);
                }
            }
            Event::End(TagEnd::HtmlBlock) => {
                flush(&mut lines, &mut current_spans);
            }
            Event::Rule => {
                flush(&mut lines, &mut current_spans);
                lines.push(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            _ => {}
        }
    }

    flush(&mut lines, &mut current_spans);
    lines
}

fn flush(lines: &mut Vec<Line<'static>>, spans: &mut Vec<Span<'static>>) {
    if !spans.is_empty() {
        lines.push(Line::from(std::mem::take(spans)));
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn push_modifier(stack: &mut Vec<Style>, modifier: Modifier) {
    let current = *stack.last().unwrap_or(&Style::default());
    stack.push(current.add_modifier(modifier));
}
