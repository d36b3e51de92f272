//! Ordered locator strategies for markup we don't control.
//!
//! Storefront themes render the same element in many ways, so every page
//! object describes an element as a [`LocatorChain`]: a list of
//! [`LocatorStrategy`] values tried in order until one matches. If none
//! match, the element is "not found" and callers get `None` or
//! [`BrowserError::ElementNotFound`](crate::BrowserError::ElementNotFound).
//!
//! Chains are plain data. They are serialized to JSON and resolved in the
//! page by the embedded helper script ([`LOCATE_SCRIPT`]).

use serde::Serialize;
use std::fmt;

/// Page-context helper installed before every locator query.
pub const LOCATE_SCRIPT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/scripts/locate.js"));

/// A case-insensitive JavaScript regular expression matched against
/// whitespace-normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextPattern {
    source: String,
    flags: String,
}

impl TextPattern {
    /// Wraps a raw regular-expression source.
    pub fn regex(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: "i".to_string(),
        }
    }

    /// Matches text containing `literal` anywhere.
    #[must_use]
    pub fn contains(literal: &str) -> Self {
        Self::regex(regex::escape(literal))
    }

    /// Matches text that starts with `literal` followed by a word boundary.
    #[must_use]
    pub fn starts_with_word(literal: &str) -> Self {
        Self::regex(format!(r"^{}\b", regex::escape(literal)))
    }

    /// The regular-expression source as sent to the page.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for TextPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// One way of finding an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocatorStrategy {
    /// A CSS selector, optionally narrowed to elements that contain a
    /// descendant matching `has` or whose text matches `has_text`.
    Css {
        /// CSS selector
        selector: String,
        /// Required descendant selector
        has: Option<String>,
        /// Required text
        has_text: Option<TextPattern>,
    },

    /// An ARIA role, optionally filtered by accessible name.
    Role {
        /// Role name (`link`, `button`, `heading`, ...)
        role: String,
        /// Accessible-name filter
        name: Option<TextPattern>,
    },

    /// The innermost elements whose text matches.
    Text {
        /// Text filter
        pattern: TextPattern,
    },
}

impl LocatorStrategy {
    /// A bare CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css {
            selector: selector.into(),
            has: None,
            has_text: None,
        }
    }

    /// A CSS selector restricted to elements containing `has`.
    pub fn css_has(selector: impl Into<String>, has: impl Into<String>) -> Self {
        Self::Css {
            selector: selector.into(),
            has: Some(has.into()),
            has_text: None,
        }
    }

    /// A CSS selector restricted to elements whose text matches `pattern`.
    pub fn css_with_text(selector: impl Into<String>, pattern: TextPattern) -> Self {
        Self::Css {
            selector: selector.into(),
            has: None,
            has_text: Some(pattern),
        }
    }

    /// An ARIA role with an accessible-name filter.
    pub fn role(role: impl Into<String>, name: TextPattern) -> Self {
        Self::Role {
            role: role.into(),
            name: Some(name),
        }
    }

    /// Every element with an ARIA role.
    pub fn any_role(role: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: None,
        }
    }

    /// Innermost elements whose text matches `pattern`.
    #[must_use]
    pub fn text(pattern: TextPattern) -> Self {
        Self::Text { pattern }
    }
}

impl fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css {
                selector,
                has,
                has_text,
            } => {
                write!(f, "css({selector})")?;
                if let Some(has) = has {
                    write!(f, ".has({has})")?;
                }
                if let Some(pattern) = has_text {
                    write!(f, ".has_text({pattern})")?;
                }
                Ok(())
            }
            Self::Role { role, name: Some(name) } => write!(f, "role({role}, {name})"),
            Self::Role { role, name: None } => write!(f, "role({role})"),
            Self::Text { pattern } => write!(f, "text({pattern})"),
        }
    }
}

/// Strategies tried in order until one matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocatorChain {
    strategies: Vec<LocatorStrategy>,
}

impl LocatorChain {
    /// A chain with a single strategy.
    #[must_use]
    pub fn new(strategy: LocatorStrategy) -> Self {
        Self {
            strategies: vec![strategy],
        }
    }

    /// A chain with a single CSS strategy.
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::css(selector))
    }

    /// One CSS strategy per selector, in the given order.
    #[must_use]
    pub fn css_each(selectors: &[&str]) -> Self {
        Self {
            strategies: selectors.iter().map(|s| LocatorStrategy::css(*s)).collect(),
        }
    }

    /// Appends a fallback strategy.
    #[must_use]
    pub fn or(mut self, strategy: LocatorStrategy) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Appends every strategy of another chain.
    #[must_use]
    pub fn or_chain(mut self, other: LocatorChain) -> Self {
        self.strategies.extend(other.strategies);
        self
    }

    /// The strategies in resolution order.
    #[must_use]
    pub fn strategies(&self) -> &[LocatorStrategy] {
        &self.strategies
    }
}

impl fmt::Display for LocatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, strategy) in self.strategies.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{strategy}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chain_serializes_for_the_page_helper() {
        let chain = LocatorChain::css("h1.product_title")
            .or(LocatorStrategy::role("button", TextPattern::regex("seguir")))
            .or(LocatorStrategy::text(TextPattern::contains("Amor")));

        let value = serde_json::to_value(&chain).unwrap();
        assert_eq!(
            value,
            json!({
                "strategies": [
                    {"kind": "css", "selector": "h1.product_title", "has": null, "has_text": null},
                    {"kind": "role", "role": "button", "name": {"source": "seguir", "flags": "i"}},
                    {"kind": "text", "pattern": {"source": "Amor", "flags": "i"}},
                ]
            })
        );
    }

    #[test]
    fn literal_patterns_are_escaped() {
        assert_eq!(TextPattern::contains("Flores (x12)").source(), r"Flores \(x12\)");
        assert_eq!(TextPattern::starts_with_word("Amor").source(), r"^Amor\b");
        assert_eq!(TextPattern::starts_with_word("a.b").source(), r"^a\.b\b");
    }

    #[test]
    fn css_each_keeps_order() {
        let chain = LocatorChain::css_each(&[".cart-subtotal .amount", ".cart-subtotal"]);
        assert_eq!(chain.strategies().len(), 2);
        assert_eq!(chain.strategies()[1], LocatorStrategy::css(".cart-subtotal"));
    }

    #[test]
    fn chain_description_lists_strategies() {
        let chain = LocatorChain::new(LocatorStrategy::css_has("ul.products > li", "a, h2"))
            .or(LocatorStrategy::any_role("combobox"))
            .or(LocatorStrategy::css_with_text(
                ".woocommerce-info",
                TextPattern::contains("carrito"),
            ));

        assert_eq!(
            chain.to_string(),
            "css(ul.products > li).has(a, h2) | role(combobox) | css(.woocommerce-info).has_text(/carrito/i)"
        );
    }

    #[test]
    fn embedded_helper_installs_namespace() {
        assert!(LOCATE_SCRIPT.contains("window.__florcart"));
        assert!(LOCATE_SCRIPT.contains("resolveAll"));
    }
}
