//! 通知・照会メッセージの整形
//!
//! すべて純粋関数。出力は Telegram の legacy Markdown。

use crate::domain::{
    ExtraBooking, ReservationCreatedMessage, ReservationDetail, ReservationStatus,
    ReservationSummary, VerificationCode,
};
use chrono::NaiveDate;
use std::fmt::Write;

pub const LIST_HEADER: &str = "Ваши бронирования:";
pub const LIST_EMPTY: &str = "У вас пока нет бронирований.";
pub const LIST_UNAVAILABLE: &str = "⚠️ Не удалось получить бронирования. Попробуйте позже.";
pub const RESERVATION_NOT_FOUND: &str = "Бронирование не найдено.";
pub const GREETING: &str = "Здравствуйте! Чтобы посмотреть свои бронирования, отправьте /reservations. \
Чтобы получить код подтверждения для бронирования на сайте, отправьте /verify";
pub const CODE_UNAVAILABLE: &str = "⚠️ Не удалось выдать код подтверждения. Попробуйте позже.";

const EXTRAS_HEADER: &str = "🔥 *Забронированы дополнительно:*";

fn full_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

fn short_date(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

/// legacy Markdown の制御文字をエスケープする
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// ステータスの表示ラベル
///
/// 未知のステータスは空文字（エラーにしない）。
pub fn status_label(status: &ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Confirmed => "Подтверждено ✅",
        ReservationStatus::Cancelled => "Отменено ❌",
        ReservationStatus::CheckedIn => "В процессе ▶",
        ReservationStatus::CheckOut => "Завершено ✅",
        ReservationStatus::Other(_) => "",
    }
}

/// 認証コードの案内
///
/// コードは数字のみなのでエスケープ不要。
pub fn render_verification_code(code: &VerificationCode) -> String {
    format!(
        "🔐 Ваш код подтверждения: `{}`\n\nУкажите его при бронировании на сайте. Код действует один час.",
        code.code
    )
}

/// 追加サービス1件分の行
pub fn render_extra_line(extra: &ExtraBooking) -> String {
    let mut line = format!(
        "• {}: {} с {} до {}",
        escape_markdown(&extra.name),
        full_date(extra.date),
        escape_markdown(&extra.time_from),
        escape_markdown(&extra.time_to),
    );
    if let Some(fill) = &extra.fill_option {
        let _ = write!(line, " ({})", escape_markdown(fill));
    }
    line
}

/// 追加サービスのブロック。空リストなら何も出力しない
fn push_extras(text: &mut String, extras: &[ExtraBooking]) {
    if extras.is_empty() {
        return;
    }
    text.push('\n');
    text.push_str(EXTRAS_HEADER);
    text.push('\n');
    for extra in extras {
        text.push_str(&render_extra_line(extra));
        text.push('\n');
    }
}

/// 運営者向けの新規予約通知
pub fn render_admin_notification(message: &ReservationCreatedMessage) -> String {
    let mut text = format!(
        "✅ *Новое бронирование*\n\
         🏠 Дом: {}\n\
         👤 Гость: {}\n\
         📞 {}\n\
         📅 {} → {}\n\
         👥 {} гостей\n\
         💳 {} ₽\n",
        escape_markdown(&message.house),
        escape_markdown(&message.guest_name),
        escape_markdown(&message.guest_phone),
        full_date(message.check_in),
        full_date(message.check_out),
        message.guests_count,
        message.total_price,
    );
    push_extras(&mut text, &message.extras);
    text
}

/// ゲスト本人向けの予約確認
pub fn render_user_notification(message: &ReservationCreatedMessage, contact_phone: &str) -> String {
    let mut text = format!(
        "✅ *Ваше бронирование подтверждено!*\n\
         🏠 Дом: {}\n\
         📅 {} → {}\n\
         👥 {} гостей\n\
         💳 Стоимость проживания: {} ₽\n\
         📞 Наш номер для связи: {}\n",
        escape_markdown(&message.house),
        full_date(message.check_in),
        full_date(message.check_out),
        message.guests_count,
        message.total_price,
        escape_markdown(contact_phone),
    );
    push_extras(&mut text, &message.extras);
    text
}

/// 予約詳細（写真のキャプションとして送る）
pub fn render_detail(detail: &ReservationDetail) -> String {
    let mut text = format!(
        "🏠 Дом: {}\n\
         📅 {} → {}\n\
         👥 {} гостей\n\
         💳 Стоимость проживания: {}₽\n\
         ℹ️ Статус: {}\n",
        escape_markdown(&detail.house_name),
        full_date(detail.check_in),
        full_date(detail.check_out),
        detail.guests_count,
        detail.total_price,
        status_label(&detail.status),
    );
    push_extras(&mut text, &detail.extras);
    text
}

/// 一覧のボタンラベル（Markdownは解釈されない）
pub fn render_summary_button(summary: &ReservationSummary) -> String {
    format!(
        "📅 {} → {} 🏠 {}",
        short_date(summary.check_in),
        short_date(summary.check_out),
        summary.house_name,
    )
}
