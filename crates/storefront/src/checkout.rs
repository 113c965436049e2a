//! WhatsApp order messages and deep links.
//!
//! Checkout does not take payment or record orders: it formats the cart as
//! a chat message and hands the visitor a `wa.me` link to send it.

use std::fmt::Write as _;

use serde::Deserialize;
use thiserror::Error;
use tomtech_core::{Cart, Price, Product, WhatsAppNumber};

const CONFIRMATION_REQUEST: &str = "Please confirm availability and payment details.";

/// Errors from checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,
}

/// Currency and link settings for order messages.
#[derive(Debug, Clone)]
pub struct MessageFormat {
    currency_label: String,
    product_url: String,
}

impl MessageFormat {
    /// Messages priced in `currency_label` that link to the storefront's
    /// product section under `base_url`.
    #[must_use]
    pub fn new(currency_label: impl Into<String>, base_url: &str) -> Self {
        Self {
            currency_label: currency_label.into(),
            product_url: product_url(base_url),
        }
    }

    /// Link included in every product line.
    #[must_use]
    pub fn product_url(&self) -> &str {
        &self.product_url
    }

    fn money(&self, price: Price) -> String {
        format!("{} {}", self.currency_label, price.display_grouped())
    }

    /// The order summary for a whole cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
    pub fn order_message(&self, cart: &Cart) -> Result<String, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut message = String::from("Hello! I would like to order the following:\n\n");
        for (index, line) in cart.lines().iter().enumerate() {
            let _ = writeln!(
                message,
                "{}. *{}* x{} - {}",
                index + 1,
                line.product.name,
                line.quantity,
                self.money(line.line_total())
            );
            let _ = write!(message, "   Link: {}\n\n", self.product_url);
        }
        let _ = write!(message, "*Total: {}*\n\n", self.money(cart.total()));
        message.push_str(CONFIRMATION_REQUEST);
        Ok(message)
    }

    /// Message ordering a single product straight from its card.
    #[must_use]
    pub fn product_inquiry_message(&self, product: &Product) -> String {
        let mut message = String::from("Hello! I'm interested in ordering:\n\n");
        let _ = writeln!(message, "*{}*", product.name);
        let _ = writeln!(message, "Price: {}", self.money(product.price));
        if !product.description.is_empty() {
            let _ = writeln!(message, "\n{}", product.description);
        }
        let _ = write!(message, "\nProduct Link: {}\n\n", self.product_url);
        message.push_str(CONFIRMATION_REQUEST);
        message
    }
}

/// The storefront URL with its fragment replaced by `#products`.
#[must_use]
pub fn product_url(base_url: &str) -> String {
    let base = base_url.split_once('#').map_or(base_url, |(base, _)| base);
    format!("{base}#products")
}

/// Opening message for a general enquiry.
#[must_use]
pub const fn general_inquiry_message() -> &'static str {
    "Hello! I would like to inquire about your services."
}

/// Contact form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactInquiry {
    #[must_use]
    pub fn to_message(&self) -> String {
        let mut message = String::from("Hello! I have an inquiry:\n\n");
        let _ = writeln!(message, "Name: {}", self.name.trim());
        let _ = writeln!(message, "Email: {}", self.email.trim());
        let _ = writeln!(message, "Phone: {}", self.phone.trim());
        if let Some(service) = non_blank(self.service.as_deref()) {
            let _ = writeln!(message, "Service: {service}");
        }
        if let Some(text) = non_blank(self.message.as_deref()) {
            let _ = writeln!(message, "Message: {text}");
        }
        message
    }
}

/// Service booking request.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub service: String,
    pub name: String,
    pub phone: String,
    pub vehicle: String,
    pub preferred_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    #[must_use]
    pub fn to_message(&self) -> String {
        let mut message = String::from("Hello! I would like to book a service:\n\n");
        let _ = writeln!(message, "Service: {}", self.service.trim());
        let _ = writeln!(message, "Name: {}", self.name.trim());
        let _ = writeln!(message, "Phone: {}", self.phone.trim());
        let _ = writeln!(message, "Vehicle: {}", self.vehicle.trim());
        let _ = writeln!(message, "Preferred Date: {}", self.preferred_date.trim());
        if let Some(notes) = non_blank(self.notes.as_deref()) {
            let _ = writeln!(message, "Notes: {notes}");
        }
        message
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `https://wa.me/{number}?text={message}` with the message URL-encoded.
#[must_use]
pub fn whatsapp_link(number: &WhatsAppNumber, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        number.as_str(),
        urlencoding::encode(message)
    )
}
