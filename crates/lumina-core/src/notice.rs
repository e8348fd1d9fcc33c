//! # Notices
//!
//! Maps cart results to the toast the storefront shows. Pure wording: the
//! core never displays anything, it only says what would be worth showing.
//!
//! ```text
//! CartResult<CartChange> ──► Notice::for_change / Notice::for_error
//! CartResult<CheckoutStatus> ──► Notice::for_checkout
//!                                     │
//!                                     ▼
//!                     { level: "success", message: "Đã thêm ..." }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CartResult};
use crate::types::{CartChange, CheckoutStatus, Direction};
use crate::MIN_ITEM_QUANTITY;

/// Prompt the external confirmation UI shows before `remove_item(id, true)`.
pub const REMOVE_CONFIRMATION_PROMPT: &str = "Bạn có chắc muốn xóa sản phẩm này khỏi giỏ hàng?";

/// Prompt the external confirmation UI shows before `clear(true)`.
pub const CLEAR_CONFIRMATION_PROMPT: &str = "Bạn có chắc muốn xóa toàn bộ giỏ hàng?";

/// Toast severity, matching the storefront's notification styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A notification-worthy message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Notice {
            level,
            message: message.into(),
        }
    }

    /// Wording for a committed change.
    pub fn for_change(change: &CartChange) -> Self {
        match change {
            CartChange::ItemAdded { .. } => {
                Notice::new(NoticeLevel::Success, "Đã thêm sản phẩm vào giỏ hàng!")
            }
            CartChange::QuantityChanged { direction, .. } => match direction {
                Some(Direction::Increased) => {
                    Notice::new(NoticeLevel::Success, "Đã tăng số lượng sản phẩm")
                }
                Some(Direction::Decreased) => {
                    Notice::new(NoticeLevel::Success, "Đã giảm số lượng sản phẩm")
                }
                None => Notice::new(NoticeLevel::Info, "Số lượng không thay đổi"),
            },
            CartChange::ItemRemoved { .. } => {
                Notice::new(NoticeLevel::Success, "Đã xóa sản phẩm khỏi giỏ hàng")
            }
            CartChange::Cleared { .. } => {
                Notice::new(NoticeLevel::Success, "Đã xóa toàn bộ giỏ hàng")
            }
            CartChange::AlreadyEmpty => Notice::new(NoticeLevel::Info, "Giỏ hàng đã trống"),
        }
    }

    /// Wording for a refused operation.
    pub fn for_error(err: &CartError) -> Self {
        match err {
            CartError::NotFound(_) => Notice::new(
                NoticeLevel::Error,
                "Không tìm thấy sản phẩm trong giỏ hàng",
            ),
            CartError::OutOfRange { requested, min, .. } if requested < min => Notice::new(
                NoticeLevel::Warning,
                format!(
                    "Số lượng tối thiểu là {MIN_ITEM_QUANTITY}. Vui lòng xóa sản phẩm nếu không muốn mua."
                ),
            ),
            CartError::OutOfRange { max, .. } => {
                Notice::new(NoticeLevel::Warning, format!("Số lượng tối đa là {max}."))
            }
            CartError::EmptyCart => Notice::new(
                NoticeLevel::Warning,
                "Giỏ hàng trống! Vui lòng thêm sản phẩm trước khi thanh toán.",
            ),
            CartError::NotConfirmed => Notice::new(NoticeLevel::Info, "Đã hủy thao tác"),
            CartError::Persistence(_) => Notice::new(
                NoticeLevel::Error,
                "Không thể lưu giỏ hàng. Vui lòng thử lại.",
            ),
            CartError::Validation(_) => {
                Notice::new(NoticeLevel::Error, "Thông tin sản phẩm không hợp lệ")
            }
        }
    }

    /// Wording for a checkout request.
    pub fn for_checkout(result: &CartResult<CheckoutStatus>) -> Self {
        match result {
            Ok(CheckoutStatus::ComingSoon) => Notice::new(
                NoticeLevel::Info,
                "Coming Soon - Tính năng thanh toán đang được phát triển!",
            ),
            Err(err) => Notice::for_error(err),
        }
    }

    /// Wording for any mutation result.
    pub fn for_result(result: &CartResult<CartChange>) -> Self {
        match result {
            Ok(change) => Notice::for_change(change),
            Err(err) => Notice::for_error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_quantity_warning() {
        let notice = Notice::for_error(&CartError::quantity_out_of_range(0));
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(
            notice.message,
            "Số lượng tối thiểu là 1. Vui lòng xóa sản phẩm nếu không muốn mua."
        );

        let notice = Notice::for_error(&CartError::quantity_out_of_range(100));
        assert_eq!(notice.message, "Số lượng tối đa là 99.");
    }

    #[test]
    fn test_change_wording() {
        let added = Notice::for_change(&CartChange::ItemAdded { id: "a".into() });
        assert_eq!(added.level, NoticeLevel::Success);
        assert_eq!(added.message, "Đã thêm sản phẩm vào giỏ hàng!");

        let decreased = Notice::for_change(&CartChange::QuantityChanged {
            id: "a".into(),
            from: 3,
            to: 2,
            direction: Some(Direction::Decreased),
        });
        assert_eq!(decreased.message, "Đã giảm số lượng sản phẩm");

        assert_eq!(
            Notice::for_change(&CartChange::AlreadyEmpty).level,
            NoticeLevel::Info
        );
    }

    #[test]
    fn test_checkout_wording() {
        let empty = Notice::for_checkout(&Err(CartError::EmptyCart));
        assert_eq!(empty.level, NoticeLevel::Warning);

        let soon = Notice::for_checkout(&Ok(CheckoutStatus::ComingSoon));
        assert_eq!(soon.level, NoticeLevel::Info);
        assert!(soon.message.starts_with("Coming Soon"));
    }
}
