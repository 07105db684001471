use crate::domain::market_data::AssetRecord;

/// US dollar amount with thousands separators.
///
/// - `|value| >= 1` -> two decimals, e.g. `$65,432.12`
/// - `|value| < 1` -> six decimals, e.g. `$0.000012`
pub fn format_currency(value: f64) -> String {
    let decimals = if value.abs() >= 1.0 || value == 0.0 { 2 } else { 6 };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(value.abs(), decimals))
}

/// Compact magnitude with a `T`/`B`/`M`/`K` suffix and two decimals.
pub fn format_large_number(value: f64) -> String {
    const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    let magnitude = value.abs();
    SCALES
        .iter()
        .find(|(scale, _)| magnitude >= *scale)
        .map(|(scale, suffix)| format!("{:.2}{suffix}", value / scale))
        .unwrap_or_else(|| format!("{value:.2}"))
}

/// Signed percentage, `+1.23%` / `-0.50%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:+.2}%")
}

/// `NN.NN% of <max>` for capped assets, `None` when supply is unbounded.
pub fn format_supply_ratio(asset: &AssetRecord) -> Option<String> {
    let percent = asset.supply_ratio()?;
    let max = asset.max_supply?;
    Some(format!("{percent:.2}% of {}", format_large_number(max)))
}

fn group_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    match fraction {
        Some(fraction) => format!("{grouped}.{fraction}"),
        None => grouped,
    }
}
