// fuel_notifier - Tankerkoenig fuel prices delivered to Telegram
//
// Copyright 2024 Nick Pillitteri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use crate::client::{FuelType, PriceQuote};

/// Format prices for a single station, e.g. `Shell A[e10: 1.479, e5: 1.539]`
pub fn format_line(name: &str, quote: &PriceQuote) -> String {
    format!(
        "{}[{}: {:.3}, {}: {:.3}]",
        name,
        FuelType::E10,
        quote.price(FuelType::E10),
        FuelType::E5,
        quote.price(FuelType::E5),
    )
}

/// Lines for each station that prices were fetched for, in the order they were added.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, quote: &PriceQuote) {
        self.lines.push(format_line(name, quote));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Newline separated message for this report or `None` if there is nothing to send.
    pub fn message(&self) -> Option<String> {
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{format_line, Report};
    use crate::client::PriceQuote;

    #[test]
    fn test_format_line() {
        let quote = PriceQuote { e10: 1.479, e5: 1.539 };
        assert_eq!("Shell A[e10: 1.479, e5: 1.539]", format_line("Shell A", &quote));
    }

    #[test]
    fn test_format_line_rounds_to_three_places() {
        let quote = PriceQuote { e10: 1.7, e5: 1.84949 };
        assert_eq!("ED Diez[e10: 1.700, e5: 1.849]", format_line("ED Diez", &quote));

        let quote = PriceQuote { e10: 1.8996, e5: 2.0 };
        assert_eq!("ED Diez[e10: 1.900, e5: 2.000]", format_line("ED Diez", &quote));
    }

    #[test]
    fn test_empty_report_has_no_message() {
        let report = Report::new();
        assert_eq!(0, report.len());
        assert_eq!(None, report.message());
    }

    #[test]
    fn test_message_joins_lines_in_order() {
        let mut report = Report::new();
        report.push("Shell A", &PriceQuote { e10: 1.479, e5: 1.539 });
        report.push("Shell B", &PriceQuote { e10: 1.689, e5: 1.749 });

        assert_eq!(2, report.len());
        assert_eq!(
            Some("Shell A[e10: 1.479, e5: 1.539]\nShell B[e10: 1.689, e5: 1.749]".to_owned()),
            report.message()
        );
    }
}
