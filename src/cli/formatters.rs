use chrono::NaiveDate;
use sales_config::Config;

/// How integer digits are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigitGrouping {
    /// `1,234,567`
    #[default]
    Thousands,
    /// `12,34,567`, used by the Indian locales.
    Lakh,
}

impl DigitGrouping {
    /// `en-IN`, `hi_IN` and other `*-IN` locales group by lakh.
    pub fn for_locale(locale: &str) -> Self {
        let region = locale.rsplit(|c: char| c == '-' || c == '_').next().unwrap_or_default();
        if region.eq_ignore_ascii_case("in") {
            DigitGrouping::Lakh
        } else {
            DigitGrouping::Thousands
        }
    }
}

/// Amount, percentage and date formatting backed by the active configuration.
#[derive(Debug, Clone)]
pub struct CliFormatters {
    currency: String,
    precision: usize,
    grouping: DigitGrouping,
}

impl CliFormatters {
    pub fn new(currency: impl Into<String>, precision: u8) -> Self {
        Self {
            currency: currency.into().to_ascii_uppercase(),
            precision: usize::from(precision),
            grouping: DigitGrouping::default(),
        }
    }

    pub fn with_grouping(mut self, grouping: DigitGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.currency.clone(), config.currency_precision)
            .with_grouping(DigitGrouping::for_locale(&config.locale))
    }

    /// `₹1,234.50` for known symbols, `1,234.50 CHF` otherwise.
    pub fn format_amount(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let digits = self.group(&format!("{:.prec$}", amount.abs(), prec = self.precision));
        match currency_symbol(&self.currency) {
            Some(symbol) => format!("{sign}{symbol}{digits}"),
            None => format!("{sign}{digits} {}", self.currency),
        }
    }

    pub fn format_percent(&self, value: f64) -> String {
        format!("{value:.1}%")
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    pub fn format_count(&self, value: u64) -> String {
        self.group(&value.to_string())
    }

    fn group(&self, number: &str) -> String {
        group_digits(number, self.grouping)
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "INR" => Some("₹"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn group_digits(number: &str, grouping: DigitGrouping) -> String {
    let (int_part, frac_part) = match number.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (number, None),
    };
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 2);
    for (idx, ch) in int_part.chars().enumerate() {
        let remaining = len - idx;
        let boundary = match grouping {
            DigitGrouping::Thousands => remaining % 3 == 0,
            DigitGrouping::Lakh => remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0),
        };
        if idx > 0 && boundary {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupee_amounts_use_symbol_and_grouping() {
        let fmt = CliFormatters::new("inr", 2);
        assert_eq!(fmt.format_amount(1234567.5), "₹1,234,567.50");
        assert_eq!(fmt.format_amount(-12.0), "-₹12.00");
        assert_eq!(fmt.format_amount(0.0), "₹0.00");
    }

    #[test]
    fn unknown_currency_is_suffixed() {
        let fmt = CliFormatters::new("CHF", 0);
        assert_eq!(fmt.format_amount(1500.4), "1,500 CHF");
    }

    #[test]
    fn percent_and_count() {
        let fmt = CliFormatters::new("INR", 2);
        assert_eq!(fmt.format_percent(23.333), "23.3%");
        assert_eq!(fmt.format_count(1000), "1,000");
    }

    #[test]
    fn indian_locale_groups_by_lakh() {
        let fmt = CliFormatters::new("INR", 2).with_grouping(DigitGrouping::for_locale("en-IN"));
        assert_eq!(fmt.format_amount(1234567.5), "₹12,34,567.50");
        assert_eq!(fmt.format_amount(99999.0), "₹99,999.00");
        assert_eq!(fmt.format_amount(512.0), "₹512.00");
        assert_eq!(fmt.format_count(100000), "1,00,000");
    }

    #[test]
    fn locale_selects_grouping() {
        assert_eq!(DigitGrouping::for_locale("en-IN"), DigitGrouping::Lakh);
        assert_eq!(DigitGrouping::for_locale("hi_IN"), DigitGrouping::Lakh);
        assert_eq!(DigitGrouping::for_locale("en-US"), DigitGrouping::Thousands);
        assert_eq!(DigitGrouping::for_locale("en"), DigitGrouping::Thousands);

        let mut config = Config::default();
        assert_eq!(CliFormatters::from_config(&config).format_count(1234567), "12,34,567");
        config.locale = "en-GB".into();
        assert_eq!(CliFormatters::from_config(&config).format_count(1234567), "1,234,567");
    }
}
