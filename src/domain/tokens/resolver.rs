//! Резолвер символов токенов из on-chain адресов
//!
//! Порядок разрешения (первое совпадение выигрывает):
//! 1. Реестр известных токенов (точное совпадение, без учета регистра)
//! 2. Таблица паттернов (регулярные выражения, по порядку)
//! 3. Структурный парсинг Move-адреса (0xADDRESS::module::Type)
//! 4. Укороченный адрес как fallback

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use regex::Regex;
use tracing::info;

use super::registry::{pattern_rules, seed_registry};

/// Сентинел для пустого/отсутствующего адреса
pub const UNKNOWN_SYMBOL: &str = "???";

const KNOWN_TICKERS: [&str; 6] = ["USDC", "USDT", "WETH", "WBTC", "DAI", "APT"];

/// Максимальная длина символа, полученного эвристикой
const MAX_PARSED_SYMBOL_LEN: usize = 8;

pub struct TokenResolver {
    registry: HashMap<String, String>,
    patterns: Vec<(Regex, String)>,
    /// Выученные соответствия (паттерн-хиты), живут до перезапуска процесса
    learned: Mutex<HashMap<String, String>>,
    /// Уже залогированные неизвестные токены
    logged_unknown: Mutex<HashSet<String>>,
}

impl TokenResolver {
    pub fn new() -> Self {
        Self {
            registry: seed_registry(),
            patterns: pattern_rules(),
            learned: Mutex::new(HashMap::new()),
            logged_unknown: Mutex::new(HashSet::new()),
        }
    }

    /// Получить символ токена по адресу (полному Move-адресу или FA адресу).
    ///
    /// Никогда не падает: в худшем случае возвращает укороченный адрес.
    pub fn resolve(&self, raw_identifier: &str) -> String {
        let trimmed = raw_identifier.trim();
        if trimmed.is_empty() {
            return UNKNOWN_SYMBOL.to_string();
        }

        let normalized = trimmed.to_lowercase();

        // 1. Реестр (точное совпадение)
        if let Some(symbol) = self.registry.get(&normalized) {
            return symbol.clone();
        }

        // Выученные ранее соответствия
        if let Some(symbol) = self.learned.lock().unwrap().get(&normalized) {
            return symbol.clone();
        }

        // 2. Паттерны по исходному адресу
        for (pattern, symbol) in &self.patterns {
            if pattern.is_match(trimmed) {
                // Кэшируем для следующих вызовов
                self.learned
                    .lock()
                    .unwrap()
                    .insert(normalized, symbol.clone());
                return symbol.clone();
            }
        }

        // 3/4. Структурный парсинг либо укороченный адрес
        let symbol = Self::parse_symbol_from_address(trimmed);

        // Логируем неизвестный токен один раз за время жизни процесса
        {
            let mut logged = self.logged_unknown.lock().unwrap();
            if logged.insert(normalized) {
                info!("🔍 Unknown token: {} -> parsed as {}", trimmed, symbol);
            }
        }

        symbol
    }

    /// Извлечь символ токена из структуры Move-адреса.
    ///
    /// Примеры:
    ///   0x1::aptos_coin::AptosCoin -> APT
    ///   0xf22bede...::asset::USDC -> USDC
    ///   0x111ae3e5...::amapt_token::AmnisApt -> amAPT
    fn parse_symbol_from_address(address: &str) -> String {
        let parts: Vec<&str> = address.split("::").collect();

        if parts.len() >= 3 {
            let module = parts[parts.len() - 2];
            let type_name = parts[parts.len() - 1];

            // Aptos Native Coin
            if type_name == "AptosCoin" {
                return "APT".to_string();
            }

            // LayerZero assets: asset::USDC -> USDC
            if module == "asset" {
                return type_name.to_uppercase();
            }

            // coin::T - обычно wrapped токены, пробуем определить по адресу
            if module == "coin" && type_name == "T" {
                if parts[0].contains("5e156f1207d0ebfa") {
                    return "WETH".to_string();
                }
                return "COIN".to_string();
            }

            // Staked tokens
            if type_name.contains("Staked") {
                if type_name.contains("Amnis") {
                    return "amAPT".to_string();
                } else if type_name.contains("Tortuga") {
                    return "tAPT".to_string();
                }
                return "stAPT".to_string();
            }

            if type_name == "AmnisApt" {
                return "amAPT".to_string();
            }

            // Celer Bridge Coins: UsdcCoin -> ceUSDC, WethCoin -> ceWETH
            if type_name.ends_with("Coin") && type_name.len() > 4 {
                let base = type_name[..type_name.len() - 4].to_uppercase();
                if ["USDC", "USDT", "WETH", "WBTC", "DAI"].contains(&base.as_str()) {
                    return format!("ce{}", base);
                }
                return base;
            }

            // DEX токены
            if type_name == "CakeOFT" {
                return "CAKE".to_string();
            }
            if module == "mod_coin" {
                return "MOD".to_string();
            }
            if module == "thl_coin" {
                return "THL".to_string();
            }

            // Известный тикер как подстрока имени типа
            let mut cleaned = type_name
                .trim_end_matches("Token")
                .trim_end_matches("Coin");
            if cleaned.is_empty() {
                cleaned = type_name;
            }
            let cleaned_upper = cleaned.to_uppercase();
            for ticker in KNOWN_TICKERS {
                if cleaned_upper.contains(ticker) {
                    return ticker.to_string();
                }
            }

            // Последняя часть как есть, с ограничением длины
            return cleaned_upper.chars().take(MAX_PARSED_SYMBOL_LEN).collect();
        }

        // Структуру распарсить не удалось - возвращаем укороченный адрес
        if let Some(hex) = address.strip_prefix("0x") {
            let short: String = hex.chars().take(6).collect();
            return format!("0x{}", short);
        }
        address.chars().take(10).collect()
    }
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_hit() {
        let resolver = TokenResolver::new();
        assert_eq!(resolver.resolve("0x1::aptos_coin::AptosCoin"), "APT");
        // Идемпотентность: повторный вызов дает тот же результат
        assert_eq!(resolver.resolve("0x1::aptos_coin::AptosCoin"), "APT");
        // Реестр не мутирует и ничего не логирует на registry-хитах
        assert!(resolver.logged_unknown.lock().unwrap().is_empty());
        assert!(resolver.learned.lock().unwrap().is_empty());
    }

    #[test]
    fn test_registry_is_case_normalized() {
        let resolver = TokenResolver::new();
        assert_eq!(resolver.resolve("0x1::APTOS_COIN::AptosCoin".to_lowercase().as_str()), "APT");
        assert_eq!(
            resolver.resolve("  0x1::aptos_coin::AptosCoin  "),
            "APT"
        );
    }

    #[test]
    fn test_fa_address_from_registry() {
        let resolver = TokenResolver::new();
        assert_eq!(
            resolver.resolve("0xbae207659db88bea0cbead6da0ed00aac12edcdda169e591cd41c94180b46f3b"),
            "USDC"
        );
    }

    #[test]
    fn test_layerzero_asset_via_pattern() {
        let resolver = TokenResolver::new();
        assert_eq!(
            resolver.resolve("0xdeadbeef0000000000000000000000000000000000000000000000000000cafe::asset::USDC"),
            "USDC"
        );
    }

    #[test]
    fn test_pattern_wins_over_heuristic() {
        let resolver = TokenResolver::new();
        // Эвристика дала бы USDC по подстроке, паттерн дает бриджевый ceUSDC
        assert_eq!(
            resolver.resolve("0xabc::some_manager::UsdcCoin"),
            "ceUSDC"
        );
        // Паттерн-хит кэшируется и не считается неизвестным токеном
        assert!(resolver.logged_unknown.lock().unwrap().is_empty());
        assert_eq!(resolver.learned.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_heuristic_parse() {
        let resolver = TokenResolver::new();
        assert_eq!(resolver.resolve("0xdeadbeef::mod::Foo"), "FOO");
        assert_eq!(resolver.resolve("0xabc::gui_inu::GuiToken"), "GUI");
    }

    #[test]
    fn test_tortuga_pattern_precedes_generic_staked() {
        let resolver = TokenResolver::new();
        assert_eq!(resolver.resolve("0xabc::staking::TortugaStakedAptos"), "tAPT");
        assert_eq!(resolver.resolve("0xabc::staking::OtherStakedAptos"), "stAPT");
    }

    #[test]
    fn test_heuristic_truncates_long_names() {
        let resolver = TokenResolver::new();
        let symbol = resolver.resolve("0xabc::meme::VeryLongMemeName");
        assert!(symbol.len() <= 8);
        assert_eq!(symbol, "VERYLONG");
    }

    #[test]
    fn test_unknown_logged_exactly_once() {
        let resolver = TokenResolver::new();
        assert_eq!(resolver.resolve("0xdeadbeef::mod::Foo"), "FOO");
        assert_eq!(resolver.resolve("0xdeadbeef::mod::Foo"), "FOO");
        assert_eq!(resolver.logged_unknown.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_opaque_fallback_for_unparseable() {
        let resolver = TokenResolver::new();
        assert_eq!(
            resolver.resolve("0x123456789abcdef00000000000000000000000000000000000000000000000ff"),
            "0x123456"
        );
        assert_eq!(resolver.resolve("notahexaddressatall"), "notahexadd");
    }

    #[test]
    fn test_empty_identifier() {
        let resolver = TokenResolver::new();
        assert_eq!(resolver.resolve(""), UNKNOWN_SYMBOL);
        assert_eq!(resolver.resolve("   "), UNKNOWN_SYMBOL);
    }

    #[test]
    fn test_wrapped_weth_via_known_address() {
        let resolver = TokenResolver::new();
        // coin::T от известного контракта WETH (не из реестра, структурный разбор)
        assert_eq!(
            resolver.resolve("0x5e156f1207d0ebfa19a9eeff00d62a282278fb8719f4fab3a586a0a2c0fffbff::coin::T"),
            "WETH"
        );
    }
}
