//! User-facing notices, in the product language.

pub const APPROVED: &str = "Фильм понравился!";
pub const REJECTED: &str = "Фильм не понравился";

pub const CREATE_FAILED: &str = "Не удалось создать комнату. Попробуйте еще раз.";
pub const ROOM_UNAVAILABLE: &str = "Комната недоступна, попробуйте другой код";
pub const JOIN_FAILED: &str = "Ошибка при подключении к комнате. Попробуйте еще раз.";

pub const READY_WITH_WISHES: &str = "Ваши пожелания отправлены!";
pub const READY_WITHOUT_WISHES: &str = "Вы подтвердили участие без пожеланий";
pub const START_FAILED: &str = "Не удалось начать голосование. Попробуйте еще раз.";
pub const CODE_COPIED: &str = "Код комнаты скопирован!";
pub const CODE_COPY_FAILED: &str = "Не удалось скопировать код";
pub const VOTING_STARTED: &str = "Голосование началось!";

pub const CANDIDATES_FAILED: &str = "Не удалось загрузить фильмы. Попробуйте еще раз.";
pub const SUBMIT_FAILED: &str = "Не удалось отправить голоса";
pub const RESULTS_FAILED: &str = "Не удалось загрузить результаты";

pub const VOTING_COMPLETE: &str = "Голосование завершено!";
pub const WAITING_FOR_OTHERS: &str = "Ожидайте результатов от других участников";

/// Prefixes a failure reason for display.
#[must_use]
pub fn failure(reason: &str,) -> String {
    format!("Ошибка: {reason}")
}
