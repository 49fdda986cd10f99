//! Pending-list operations
//!
//! Pure list manipulation for the enquiry cart. The store holds at most one
//! line item per productId; upserts replace the existing entry in place so
//! the shopper's ordering is preserved.

use lithos_common::enquiry::EnquiryLineItem;

/// Insert or replace the line item for its productId
///
/// Replacement keeps the original list position; a new productId is
/// appended at the end.
pub fn upsert(items: &mut Vec<EnquiryLineItem>, item: EnquiryLineItem) {
    match items.iter_mut().find(|existing| existing.product_id == item.product_id) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

/// Remove the line item for a productId, if present
///
/// Returns whether anything was removed; removing an absent productId is a
/// no-op, not an error.
pub fn remove(items: &mut Vec<EnquiryLineItem>, product_id: i64) -> bool {
    let before = items.len();
    items.retain(|item| item.product_id != product_id);
    items.len() != before
}
