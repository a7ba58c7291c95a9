use std::fmt::Write as _;

use crate::matrix::BitmapMatrix;

impl BitmapMatrix {
    /// Box-drawn rendering, two columns per module.
    pub fn render(&self) -> String {
        let side = self.side();
        let bar = "═".repeat(side * 2);
        let mut out = String::with_capacity((side + 2) * (side * 2 + 2) * 3);

        writeln!(out, "╔{bar}╗").unwrap();
        for row in self.modules().chunks(side) {
            out.push('║');
            for &module in row {
                out.push_str(if module != 0 { "██" } else { "  " });
            }
            out.push_str("║\n");
        }
        writeln!(out, "╚{bar}╝").unwrap();
        out
    }

    /// Compact rendering, one character per module, no border.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.modules().len() * 3 + self.side());
        for row in self.modules().chunks(self.side()) {
            for &module in row {
                out.push(if module != 0 { '█' } else { ' ' });
            }
            out.push('\n');
        }
        out
    }
}
