//! Argument parsing and terminal formatting shared by the commands.

use anyhow::{Result, bail};
use ventas::{ValuationRecord, valuation::round_percent};

/// Print a boxed section title.
pub(crate) fn print_header(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Print a titled separator.
pub(crate) fn print_section(title: &str) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{title}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

/// Parse a comma separated list of yearly growth percentages.
///
/// Empty entries become `None`; `"10,,5"` is `[Some(10), None, Some(5)]`.
/// A trailing `%` on an entry is accepted.
pub(crate) fn parse_growth(input: &str) -> Result<Vec<Option<f64>>> {
    input
        .split(',')
        .map(str::trim)
        .map(|part| {
            if part.is_empty() {
                return Ok(None);
            }
            let number = part.trim_end_matches('%').trim();
            match number.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Some(value)),
                _ => bail!("invalid growth rate '{part}'"),
            }
        })
        .collect()
}

/// Require every year to have a rate.
pub(crate) fn require_rates(rates: &[Option<f64>]) -> Result<Vec<f64>> {
    rates
        .iter()
        .enumerate()
        .map(|(year, rate)| match rate {
            Some(value) => Ok(*value),
            None => bail!("growth rate for year {} is missing (use --estimates to fill gaps)", year + 1),
        })
        .collect()
}

/// Compact money amount: `1.23B`, `456.70M`, `12.00K`.
pub(crate) fn format_amount(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{value:.2}")
    }
}

/// Growth schedule as `12% / 10% / 8%`.
pub(crate) fn format_growth(rates: &[f64]) -> String {
    if rates.is_empty() {
        return "none".to_string();
    }
    rates
        .iter()
        .map(|r| format!("{r}%"))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Undervaluation rounded to two decimals, or `n/a`.
pub(crate) fn format_undervaluation(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:+.2}%", round_percent(v)))
}

/// Current price or `n/a`.
pub(crate) fn format_price(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

/// Short markers for the record's caveats.
pub(crate) fn flags(record: &ValuationRecord) -> String {
    let mut flags = Vec::new();
    if record.ps_fallback {
        flags.push("fallback-ps");
    }
    if record.low_confidence {
        flags.push("low-confidence");
    }
    flags.join(",")
}

/// Print one record in full.
pub(crate) fn print_record(record: &ValuationRecord) {
    println!("{} ({})", record.name, record.ticker);
    println!("  Currency:        {}", record.currency);
    println!("  Revenue (TTM):   {}", format_amount(record.revenue_ttm));
    println!("  Growth:          {}", format_growth(&record.growth_rates));
    println!("  Projected rev.:  {}", format_amount(record.projected_revenue));
    if record.ps_fallback {
        println!("  P/S multiple:    {:.2} (fallback, no usable history)", record.ps_average);
    } else {
        println!(
            "  P/S multiple:    {:.2} (average of {} quarters)",
            record.ps_average, record.ps_samples
        );
    }
    println!("  Target price:    {:.2}", record.target_price);
    println!("  Current price:   {}", format_price(record.current_price));
    println!(
        "  Undervaluation:  {}",
        format_undervaluation(record.undervaluation_percent)
    );
    if record.low_confidence {
        println!("  Note: no revenue reported; target is not meaningful");
    }
    println!("  Updated:         {}", record.last_updated.format("%Y-%m-%d %H:%M UTC"));
    println!();
}

/// Print a ranked table starting at rank `first_rank`.
pub(crate) fn print_table(records: &[ValuationRecord], first_rank: usize) {
    println!(
        "{:>4} {:<8} {:<24} {:<4} {:>10} {:<18} {:>10} {:>7} {:>10} {:>10} {:>10}  {}",
        "#", "Ticker", "Name", "Cur", "Rev TTM", "Growth", "Projected", "P/S", "Target", "Price",
        "Under", "Flags"
    );
    println!("{}", "─".repeat(140));

    for (offset, record) in records.iter().enumerate() {
        println!(
            "{:>4} {:<8} {:<24} {:<4} {:>10} {:<18} {:>10} {:>7.2} {:>10.2} {:>10} {:>10}  {}",
            first_rank + offset,
            record.ticker,
            truncate(&record.name, 24),
            record.currency,
            format_amount(record.revenue_ttm),
            truncate(&format_growth(&record.growth_rates), 18),
            format_amount(record.projected_revenue),
            record.ps_average,
            record.target_price,
            format_price(record.current_price),
            format_undervaluation(record.undervaluation_percent),
            flags(record),
        );
    }
    println!();
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_growth() {
        assert_eq!(
            parse_growth("12, 10%,8").unwrap(),
            vec![Some(12.0), Some(10.0), Some(8.0)]
        );
        assert_eq!(
            parse_growth(",,5").unwrap(),
            vec![None, None, Some(5.0)]
        );
        assert_eq!(parse_growth("-5").unwrap(), vec![Some(-5.0)]);
        assert!(parse_growth("ten").is_err());
        assert!(parse_growth("inf").is_err());
    }

    #[test]
    fn test_require_rates() {
        assert_eq!(require_rates(&[Some(1.0), Some(2.0)]).unwrap(), vec![1.0, 2.0]);
        let err = require_rates(&[Some(1.0), None]).unwrap_err();
        assert!(err.to_string().contains("year 2"));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1_234_000_000.0), "1.23B");
        assert_eq!(format_amount(2_500_000_000_000.0), "2.50T");
        assert_eq!(format_amount(456_700_000.0), "456.70M");
        assert_eq!(format_amount(12_000.0), "12.00K");
        assert_eq!(format_amount(0.0), "0.00");
    }

    #[test]
    fn test_format_undervaluation() {
        assert_eq!(format_undervaluation(Some(65.004)), "+65.00%");
        assert_eq!(format_undervaluation(Some(-12.346)), "-12.35%");
        assert_eq!(format_undervaluation(None), "n/a");
    }

    #[test]
    fn test_format_growth() {
        assert_eq!(format_growth(&[10.0, 20.5]), "10% / 20.5%");
        assert_eq!(format_growth(&[]), "none");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Acme", 8), "Acme");
        assert_eq!(truncate("Acme Corporation", 8), "Acme Co…");
    }
}
