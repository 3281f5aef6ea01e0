use rust_decimal::Decimal;

pub(crate) const CURRENCY: &str = "₹";

/// Two decimal places with comma grouping, e.g. `-3700` → `"-₹3,700.00"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let fixed = format!("{:.2}", val.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{CURRENCY}{grouped}.{cents}")
}

/// Stored amount text rendered as currency, or shown raw when it does not parse.
pub(crate) fn format_stored_amount(raw: &str) -> String {
    crate::models::parse_decimal(raw)
        .map(format_amount)
        .unwrap_or_else(|| raw.to_string())
}

pub(crate) fn remaining_label(remaining: Option<Decimal>) -> String {
    match remaining {
        Some(rem) => format!("Remaining this month: {}", format_amount(rem)),
        None => "No budget set".to_string(),
    }
}

/// At most `max` characters; longer text ends in "…".
pub(crate) fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some(_) if max == 0 => String::new(),
        Some(_) => {
            let cut = s.char_indices().nth(max - 1).map_or(0, |(i, _)| i);
            format!("{}…", &s[..cut])
        }
    }
}

/// Selected row plus the first row shown in a window of `page` rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ListCursor {
    pub(crate) index: usize,
    pub(crate) offset: usize,
}

impl ListCursor {
    pub(crate) fn down(&mut self, len: usize, page: usize) {
        if self.index + 1 < len {
            self.index += 1;
            self.follow(page);
        }
    }

    pub(crate) fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.offset = self.offset.min(self.index);
    }

    pub(crate) fn top(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn bottom(&mut self, len: usize, page: usize) {
        if len > 0 {
            self.index = len - 1;
            self.follow(page);
        }
    }

    /// Pull the cursor back inside a list that shrank to `len` rows.
    pub(crate) fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
        self.offset = self.offset.min(self.index);
    }

    fn follow(&mut self, page: usize) {
        let page = page.max(1);
        if self.index >= self.offset + page {
            self.offset = self.index + 1 - page;
        }
    }
}
