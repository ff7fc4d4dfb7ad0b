//! Реестр известных токенов Aptos/Sui
//!
//! Данные, а не код: seed-реестр точных соответствий и упорядоченная
//! таблица паттернов. Пополняется по мере появления новых токенов в логах.

use std::collections::HashMap;

use regex::Regex;

/// Seed-реестр: полный Move-адрес или короткий FA адрес -> символ.
/// Ключи хранятся в нижнем регистре, поиск по нормализованному адресу.
pub fn seed_registry() -> HashMap<String, String> {
    let entries: &[(&str, &str)] = &[
        // Aptos Native
        ("0x1::aptos_coin::AptosCoin", "APT"),
        // LayerZero Stablecoins
        (
            "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::USDC",
            "USDC",
        ),
        (
            "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::USDT",
            "USDT",
        ),
        (
            "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::WETH",
            "WETH",
        ),
        (
            "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::WBTC",
            "WBTC",
        ),
        // Wrapped/Staked APT
        (
            "0x111ae3e5bc816a5e63c2da97d0aa3886519e0cd5e4b046659fa35796bd11542a::amapt_token::AmnisApt",
            "amAPT",
        ),
        // Альтернативный контракт amAPT
        (
            "0xa259be733b6a759909f92815927fa213904df6540519568692caf0b068fe8e62::amapt_token::AmnisApt",
            "amAPT",
        ),
        (
            "0x84d7aeef42d38a5ffc3ccef853e1b82e4958659d16a7de736a29c55fbbeb0114::staked_aptos_coin::StakedAptosCoin",
            "stAPT",
        ),
        (
            "0xd11107bdf0d6d7040c6c0bfbdecb6545191fdf13e8d8d259952f53e1713f61b5::staked_coin::StakedAptos",
            "stAPT",
        ),
        // DEX Tokens
        (
            "0x5e156f1207d0ebfa19a9eeff00d62a282278fb8719f4fab3a586a0a2c0fffbea::coin::T",
            "USDC",
        ),
        (
            "0x8d87a65ba30e09357fa2edea2c80dbac296e5dec2b18287113500b902942929d::celer_coin_manager::UsdcCoin",
            "ceUSDC",
        ),
        // FA адреса
        (
            "0x000000000000000000000000000000000000000000000000000000000000000a",
            "APT",
        ),
        (
            "0x0009da434d9b873b5159e8eeed70202ad22dc075867a7793234fbc981b63e119",
            "APT",
        ),
        (
            "0xbae207659db88bea0cbead6da0ed00aac12edcdda169e591cd41c94180b46f3b",
            "USDC",
        ),
        (
            "0x357b0b74bc833e95a115ad22604854d6b0fca151cecd94111770e5d6ffc9dc2b",
            "USDT",
        ),
        (
            "0x377adc4848552eb2ea17259be928001923efe12271fef1667e2b784f04a7cf3a",
            "USDt",
        ),
        (
            "0x81214a80d82035a190fcb76b6ff3c0145161c3a9f33d137f2bbaee4cfec8a387",
            "xBTC",
        ),
        (
            "0x68844a0d7f2587e726ad0579f3d640865bb4162c08a4589eeda3f9689ec52a3d",
            "WBTC",
        ),
        (
            "0xb30a694a344edee467d9f82330bbe7c3b89f440a1ecd2da1f3bca266560fce69",
            "sUSDe",
        ),
        (
            "0x821c94e69bc7ca058c913b7b5e6b0a5c9fd1523d58723a966fb8c1f5ea888105",
            "kAPT",
        ),
        (
            "0x05fabd1b12e39967a3c24e91b7b8f67719a6dacee74f3c8b9fb7d93e855437d2",
            "USD1",
        ),
    ];

    entries
        .iter()
        .map(|(addr, symbol)| (addr.to_lowercase(), symbol.to_string()))
        .collect()
}

/// Упорядоченная таблица паттернов: (regex, символ).
///
/// Порядок важен: некоторые суффиксы являются подстроками других,
/// первое совпадение выигрывает.
pub fn pattern_rules() -> Vec<(Regex, String)> {
    let rules: &[(&str, &str)] = &[
        // Aptos Native
        (r"::aptos_coin::AptosCoin$", "APT"),
        // LayerZero Assets
        (r"::asset::USDC$", "USDC"),
        (r"::asset::USDT$", "USDT"),
        (r"::asset::WETH$", "WETH"),
        (r"::asset::WBTC$", "WBTC"),
        (r"::asset::DAI$", "DAI"),
        // Celer Bridge
        (r"UsdcCoin$", "ceUSDC"),
        (r"UsdtCoin$", "ceUSDT"),
        (r"WethCoin$", "ceWETH"),
        (r"WbtcCoin$", "ceWBTC"),
        (r"DaiCoin$", "ceDAI"),
        // Liquid Staking: TortugaStakedAptos раньше StakedAptos,
        // иначе более общий суффикс перехватит его
        (r"AmnisApt$", "amAPT"),
        (r"TortugaStakedAptos$", "tAPT"),
        (r"StakedAptosCoin$", "stAPT"),
        (r"StakedAptos$", "stAPT"),
        // Wormhole
        (r"::coin::USDC$", "whUSDC"),
        (r"::coin::USDT$", "whUSDT"),
        (r"::coin::WETH$", "whWETH"),
        // DEX tokens
        (r"CakeOFT$", "CAKE"),
        (r"::mod_coin::MOD$", "MOD"),
        (r"::thl_coin::THL$", "THL"),
    ];

    rules
        .iter()
        .map(|(pattern, symbol)| {
            let re = Regex::new(&format!("(?i){}", pattern))
                .unwrap_or_else(|e| panic!("invalid token pattern {}: {}", pattern, e));
            (re, symbol.to_string())
        })
        .collect()
}
