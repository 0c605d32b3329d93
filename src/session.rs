// Session context: active currency and the current selection for one visitor

use crate::catalog::PricedItem;
use crate::currency::Currency;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub currency: Currency,
    pub selection: Option<PricedItem>,
}

impl SessionContext {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            selection: None,
        }
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    // Replaces any earlier selection
    pub fn select(&mut self, item: PricedItem) {
        self.selection = Some(item);
    }

    pub fn clear_selection(&mut self) -> Option<PricedItem> {
        self.selection.take()
    }

    pub fn format_price(&self, item: &PricedItem) -> String {
        item.format_price(self.currency)
    }

    // Total shown next to the selected service, if any
    pub fn total_label(&self) -> Option<String> {
        self.selection.as_ref().map(|item| self.format_price(item))
    }
}
