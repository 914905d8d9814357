//! Events dispatched from the bulk importer to the application root.
//!
//! The importer never writes to the store directly: each accepted row is sent
//! as a [`ProductCreated`] event and applied when the owner of the store
//! drains the channel, in the order the rows were sent.

use std::sync::mpsc::{Receiver, Sender, channel};

use crate::domain::product::NewProduct;

/// Request to append a product built from an import row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreated(pub NewProduct);

impl ProductCreated {
    pub fn into_inner(self) -> NewProduct {
        self.0
    }
}

/// Channel carrying [`ProductCreated`] events.
pub fn product_created_channel() -> (Sender<ProductCreated>, Receiver<ProductCreated>) {
    channel()
}
