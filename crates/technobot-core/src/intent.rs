//! Offline fallback for the intent endpoint.
//!
//! When no configured intent URL answers, the demo keeps working: a
//! keyword-and-digit heuristic substitutes a response with the same shape
//! the real endpoint would have returned.

use log::debug;
use regex::Regex;
use std::sync::OnceLock;
use technobot_protocol::{Amount, AskPayload, IntentResponse, TransferDetails};

/// Canned answer when the endpoint is unreachable and no transfer was implied.
pub const OFFLINE_ANSWER: &str = "Xin lỗi, không thể kết nối đến server API. \
Đây có thể là demo offline - bạn có thể thử các tính năng khác của TECHNOBOT!";

/// Phrases that imply a transfer request, in folded lowercase.
const TRANSFER_PHRASES: &[&str] = &["chuyen tien", "chuyen khoan", "transfer"];

fn digit_run() -> &'static Regex {
    static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();
    DIGIT_RUN.get_or_init(|| Regex::new(r"\d[\d.,]*").expect("digit run pattern"))
}

/// Substitute an intent response for a message the endpoint never saw.
///
/// A transfer phrase combined with a digit run becomes a mock
/// `transfer_money` action carrying the digits as the amount; everything
/// else becomes a canned offline `ask` answer.
pub fn offline_intent_response(text: &str) -> IntentResponse {
    let folded = fold_lower(text);
    let implies_transfer = TRANSFER_PHRASES
        .iter()
        .any(|phrase| folded.contains(phrase));
    let amount = digit_run()
        .find(text)
        .map(|run| parse_digits(run.as_str()));

    match (implies_transfer, amount) {
        (true, Some(amount)) if amount.value() > 0 => {
            debug!(
                "substituting mock transfer intent (amount={})",
                amount.value()
            );
            IntentResponse::TransferMoney(TransferDetails {
                amount,
                memo: text.trim().to_string(),
                ..TransferDetails::default()
            })
        }
        _ => IntentResponse::Ask(AskPayload {
            answer: Some(OFFLINE_ANSWER.to_string()),
        }),
    }
}

/// Parse a digit run, ignoring grouping separators.
fn parse_digits(run: &str) -> Amount {
    let cleaned: String = run.chars().filter(char::is_ascii_digit).collect();
    Amount::from(cleaned.parse().unwrap_or(0))
}

/// Lowercase and strip the Vietnamese diacritics used in transfer phrasing.
fn fold_lower(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|ch| match ch {
            'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ'
            | 'ấ' | 'ẩ' | 'ẫ' | 'ậ' => 'a',
            'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' => 'e',
            'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' => 'i',
            'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ'
            | 'ớ' | 'ở' | 'ỡ' | 'ợ' => 'o',
            'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' => 'u',
            'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' => 'y',
            'đ' => 'd',
            other => other,
        })
        .collect()
}
