//! Receipt and notice formatting for the pending-transfer state machine.

use crate::confirm::ConfirmKeyword;
use chrono::{DateTime, Local};
use technobot_protocol::TransferDetails;

/// Assistant reply shown while the confirmation card is prepared.
pub const PREPARING_TRANSFER: &str = "🔄 Đang chuẩn bị thông tin chuyển tiền...";

/// Notice after a successful cancellation.
pub const CANCEL_NOTICE: &str = "❌ **Giao dịch đã được hủy thành công!**\n\n\
Quý khách có thể thực hiện giao dịch mới bất kỳ lúc nào.";

/// Reply to a confirm keyword with nothing pending.
pub const NO_PENDING_CONFIRM: &str = "❌ Không có giao dịch nào đang chờ xác nhận. \
Vui lòng thực hiện lại yêu cầu chuyển tiền.";

/// Reply to a cancel keyword with nothing pending.
pub const NO_PENDING_CANCEL: &str = "❌ Không có giao dịch nào đang chờ xác nhận để hủy.";

/// Reply when clipboard extraction found nothing usable.
pub const NO_VALID_TRANSFER: &str =
    "❌ Không tìm thấy thông tin chuyển tiền hợp lệ trong văn bản.";

/// Section divider used in the receipt.
const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Resolution requested for a pending transfer.
///
/// Typed keywords and UI buttons both map onto this, so the two paths stay
/// behaviorally identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAction {
    /// Execute the pending transfer.
    Confirm,
    /// Discard the pending transfer.
    Cancel,
}

impl From<ConfirmKeyword> for TransferAction {
    fn from(keyword: ConfirmKeyword) -> Self {
        match keyword {
            ConfirmKeyword::Confirm => TransferAction::Confirm,
            ConfirmKeyword::Cancel => TransferAction::Cancel,
        }
    }
}

/// Derive the pseudo transaction id: `TCB` + raw amount + account tail.
pub fn transaction_code(details: &TransferDetails) -> String {
    let account = &details.recipient_account;
    let tail_start = account
        .char_indices()
        .rev()
        .nth(3)
        .map(|(index, _)| index)
        .unwrap_or(0);
    format!("TCB{}{}", details.amount.value(), &account[tail_start..])
}

/// Format the success receipt for a confirmed transfer.
pub fn success_receipt(details: &TransferDetails, completed_at: DateTime<Local>) -> String {
    format!(
        "🏦 **TECHCOMBANK - XÁC NHẬN CHUYỂN TIỀN**\n\n\
         {DIVIDER}\n\n\
         💰 **Số tiền:** {} VND\n\
         🏦 **Ngân hàng nhận:** {}\n\
         📱 **Số tài khoản:** {}\n\
         👤 **Người nhận:** {}\n\
         📝 **Nội dung:** {}\n\n\
         {DIVIDER}\n\n\
         ✅ **GIAO DỊCH ĐÃ ĐƯỢC THỰC HIỆN THÀNH CÔNG!**\n\n\
         🔢 **Mã giao dịch:** {}\n\
         ⏰ **Thời gian:** {}\n\n\
         {DIVIDER}\n\n\
         Cảm ơn Quý khách đã sử dụng dịch vụ Techcombank! 🙏",
        details.amount.formatted(),
        details.bank_name,
        details.recipient_account,
        details.recipient_name,
        details.memo,
        transaction_code(details),
        completed_at.format("%d/%m/%Y %H:%M:%S"),
    )
}
