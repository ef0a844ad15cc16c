use ansi_term::{Color, Style};
use std::io::{self, IsTerminal, Write};

use crate::sections::SectionNode;
use crate::strings::StringRecord;

const FG_COLORS: [u8; 7] = [1, 2, 3, 4, 5, 6, 7];

pub struct Printer<W: Write> {
    out: W,
    color: bool,
    last_style: Style,
}

impl Printer<io::Stdout> {
    /// Printer on stdout. Color requires both the flag allowing it and
    /// stdout being a terminal; redirected output stays plain.
    pub fn stdout(no_color: bool) -> Self {
        let color = !no_color && io::stdout().is_terminal();
        Printer::new(io::stdout(), color)
    }
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            last_style: Style::default(),
        }
    }

    fn print(&mut self, s: &str, style: Style) {
        let style = if self.color { style } else { Style::default() };
        if self.last_style != style {
            let _ = write!(self.out, "{}", self.last_style.infix(style));
            self.last_style = style;
        }
        let _ = write!(self.out, "{}", s);
    }

    fn newline(&mut self) {
        self.print("\n", Style::default());
    }

    pub fn print_tree(&mut self, root: &SectionNode) {
        for (i, child) in root.children.iter().enumerate() {
            self.print_node(child, 0, i);
        }
    }

    fn print_node(&mut self, node: &SectionNode, depth: usize, idx: usize) {
        self.print(
            &format!("{:#010x} {:>8} ", node.addr, node.size),
            Style::default().dimmed(),
        );
        self.print(&"  ".repeat(depth), Style::default());
        self.print(
            &node.name,
            Style::default().fg(Color::Fixed(FG_COLORS[idx % FG_COLORS.len()])),
        );
        self.newline();
        for (i, child) in node.children.iter().enumerate() {
            self.print_node(child, depth + 1, i);
        }
    }

    pub fn print_section(&mut self, node: &SectionNode) {
        self.print(
            &format!("{:#010x} {:>8} ", node.addr, node.size),
            Style::default().dimmed(),
        );
        self.print(&node.name, Style::default().fg(Color::Fixed(6)));
        self.newline();
    }

    pub fn print_records(&mut self, records: &[StringRecord], demangle: bool) {
        for rec in records {
            self.print(
                &format!("{:#010x} | ", rec.offset),
                Style::default().dimmed(),
            );
            let shown: String = rec
                .text
                .chars()
                .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '.' })
                .collect();
            self.print(&shown, Style::default());
            if demangle {
                if let Ok(sym) = rustc_demangle::try_demangle(&rec.text) {
                    self.print("  ", Style::default());
                    self.print(
                        &format!("{:#}", sym),
                        Style::default().fg(Color::Fixed(3)),
                    );
                }
            }
            self.newline();
        }
    }
}
