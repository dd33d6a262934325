//! Stock availability detection for product detail pages.
//!
//! A product is available when a clickable control sits inside the "add"
//! region of the quantity selector. Regions are tracked with an explicit
//! stack of the container elements entered since the quantity selector
//! opened, so leaving a region always pops exactly what entered it.

use crate::catalog::selectors::detail;
use crate::catalog::tokens::{Tag, Token, TokenStream};
use tracing::trace;

/// Container entered while inside the quantity selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Quantity,
    Add,
    Plain,
}

/// Where the scanner currently is relative to the quantity selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Outside,
    InQuantity { depth: usize },
    InQuantityAdd { depth: usize },
}

/// Scanner state carried between tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    regions: Vec<Region>,
}

impl ScanState {
    /// Initial state, outside any tracked region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        let depth = self.regions.len();
        if depth == 0 {
            Phase::Outside
        } else if self.regions.contains(&Region::Add) {
            Phase::InQuantityAdd { depth }
        } else {
            Phase::InQuantity { depth }
        }
    }

    /// Advances the scanner by one token.
    ///
    /// Returns `Some(true)` as soon as a control appears inside the add region;
    /// every other token yields the next state and `None`.
    pub fn step(mut self, token: &Token) -> (Self, Option<bool>) {
        match token {
            Token::Open(tag) if tag.name == detail::CONTAINER_TAG => self.enter(tag),
            Token::Open(tag) if tag.name == detail::CONTROL_TAG => {
                if self.regions.contains(&Region::Add) {
                    return (self, Some(true));
                }
            }
            Token::Close(name) if name == detail::CONTAINER_TAG => {
                if let Some(region) = self.regions.pop() {
                    trace!(phase = ?self.phase(), "Left {:?} region", region);
                }
            }
            _ => {}
        }

        (self, None)
    }

    fn enter(&mut self, tag: &Tag) {
        let class = tag.attr("class");

        let region = if class == Some(detail::QUANTITY_CLASS) {
            Region::Quantity
        } else if self.regions.is_empty() {
            return;
        } else if class == Some(detail::ADD_CLASS) {
            Region::Add
        } else {
            Region::Plain
        };

        self.regions.push(region);
        trace!(phase = ?self.phase(), "Entered {:?} region", region);
    }
}

/// Runs the scanner over a token sequence; exhaustion without a control means unavailable.
pub fn scan_tokens(tokens: impl IntoIterator<Item = Token>) -> bool {
    let mut state = ScanState::new();

    for token in tokens {
        let (next, result) = state.step(&token);
        if let Some(available) = result {
            return available;
        }
        state = next;
    }

    false
}

/// Determines availability from a detail page's raw markup.
pub fn is_available(html: &str) -> bool {
    scan_tokens(TokenStream::new(html))
}
