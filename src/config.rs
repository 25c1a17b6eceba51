//! Grid configuration
//!
//! Per-screen settings: the persistence module key, pagination defaults, the
//! structural column denylist used by the export projection, and how footer
//! totals are rendered as currency.

use rust_decimal::{Decimal, RoundingStrategy};

/// Column ids that are never hideable and never exported
pub const DEFAULT_STRUCTURAL_COLUMNS: [&str; 3] = ["select", "actions", "expander"];

/// Configuration for one grid instance
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Persistence namespace, e.g. "clients" or "batches"
    pub module: String,
    /// Initial page size
    pub page_size: usize,
    /// Page sizes offered by the page-size selector
    pub page_size_options: Vec<usize>,
    /// Ids excluded from the export projection
    pub structural_columns: Vec<String>,
    /// Footer currency formatting
    pub currency: CurrencyFormat,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            module: "default".to_string(),
            page_size: 10,
            page_size_options: vec![10, 20, 30, 40, 50],
            structural_columns: DEFAULT_STRUCTURAL_COLUMNS
                .iter()
                .map(|id| id.to_string())
                .collect(),
            currency: CurrencyFormat::brl(),
        }
    }
}

impl GridConfig {
    /// Create a GridConfig for a module with a custom page size
    ///
    /// Invalid values (empty module, zero page size) fall back to the defaults
    /// with a warning.
    pub fn new(module: &str, page_size: usize) -> Self {
        let default = Self::default();

        let module = if module.trim().is_empty() {
            tracing::warn!(
                "Invalid module key ({:?}), using default ({})",
                module,
                default.module
            );
            default.module.clone()
        } else {
            module.trim().to_string()
        };

        let page_size = if page_size == 0 {
            tracing::warn!(
                "Invalid page_size ({}), using default ({})",
                page_size,
                default.page_size
            );
            default.page_size
        } else {
            page_size
        };

        Self {
            module,
            page_size,
            ..default
        }
    }

    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }

    pub fn is_structural(&self, column_id: &str) -> bool {
        self.structural_columns.iter().any(|id| id == column_id)
    }
}

/// Localized currency rendering for footer totals
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_separator: char,
    pub thousands_separator: char,
    pub decimals: u32,
}

impl CurrencyFormat {
    /// Brazilian real: `R$ 1.234,56`
    pub fn brl() -> Self {
        Self {
            symbol: "R$".to_string(),
            decimal_separator: ',',
            thousands_separator: '.',
            decimals: 2,
        }
    }

    /// US dollar: `$ 1,234.56`
    pub fn usd() -> Self {
        Self {
            symbol: "$".to_string(),
            decimal_separator: '.',
            thousands_separator: ',',
            decimals: 2,
        }
    }

    /// Look up a preset by ISO code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "brl" => Some(Self::brl()),
            "usd" => Some(Self::usd()),
            _ => None,
        }
    }

    /// Render an amount, rounding half away from zero
    pub fn format(&self, amount: Decimal) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.decimals, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = format!("{:.*}", self.decimals as usize, rounded.abs());
        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (index, digit) in integer.chars().enumerate() {
            if index > 0 && (integer.len() - index) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(digit);
        }
        if let Some(fraction) = fraction {
            grouped.push(self.decimal_separator);
            grouped.push_str(fraction);
        }

        let sign = if negative { "-" } else { "" };
        format!("{}{} {}", sign, self.symbol, grouped)
    }
}
