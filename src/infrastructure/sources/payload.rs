//! Помощники для разбора гетерогенных JSON-ответов
//!
//! Одно и то же логическое поле приходит под разными ключами и типами
//! (число либо строка) в зависимости от протокола. Весь разбор
//! сосредоточен здесь, а не размазан по адаптерам.

use serde_json::Value;

/// Число из первого присутствующего ключа; число или числовая строка
pub(crate) fn get_f64(value: &Value, keys: &[&str]) -> f64 {
    for key in keys {
        match value.get(key) {
            Some(Value::Number(n)) => return n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => {
                if let Ok(parsed) = s.parse::<f64>() {
                    return parsed;
                }
            }
            _ => {}
        }
    }
    0.0
}

/// Строка из первого присутствующего ключа
pub(crate) fn get_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    for key in keys {
        if let Some(Value::String(s)) = value.get(key) {
            return Some(s.as_str());
        }
    }
    None
}
