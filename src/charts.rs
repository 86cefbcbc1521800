// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub const DEFAULT_WIDTH: usize = 40;

/// Horizontal bar chart, one `label | bars value` line per entry, scaled to
/// the largest absolute value. Negative values draw with a lighter shade.
pub fn bar_chart(data: &[(String, Decimal)], max_width: usize) -> String {
    if data.is_empty() {
        return "No data available.".to_string();
    }
    let max_value = data
        .iter()
        .map(|(_, v)| v.abs().to_f64().unwrap_or(0.0))
        .fold(0.0f64, f64::max);
    let label_width = data.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(data.len());
    for (label, value) in data {
        let v = value.to_f64().unwrap_or(0.0);
        let bar_length = if max_value > 0.0 {
            ((v.abs() / max_value) * max_width as f64).round() as usize
        } else {
            0
        };
        let glyph = if v < 0.0 { "░" } else { "█" };
        lines.push(format!(
            "{:<width$} │{} {:.2}",
            label,
            glyph.repeat(bar_length),
            value,
            width = label_width
        ));
    }
    lines.join("\n")
}

/// Two bars per label, used for income vs expense.
pub fn paired_bar_chart(
    data: &[(String, Decimal, Decimal)],
    names: (&str, &str),
    max_width: usize,
) -> String {
    let mut flat = Vec::with_capacity(data.len() * 2);
    for (label, a, b) in data {
        flat.push((format!("{} {}", label, names.0), *a));
        flat.push((format!("{} {}", label, names.1), *b));
    }
    bar_chart(&flat, max_width)
}
