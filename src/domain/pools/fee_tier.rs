//! Утилиты для работы с Fee Tier
//!
//! Конвенция значений из API: 100, 500, 2500, 10000;
//! fee_rate / 10000 дает процент.

/// Конвертирует feeRate в читаемый формат процентов ("0.25%" или "N/A")
pub fn format_fee_tier(fee_rate: u32) -> String {
    if fee_rate == 0 {
        return "N/A".to_string();
    }
    let fee_percentage = fee_rate as f64 / 10000.0;
    format!("{:.2}%", fee_percentage)
}

/// Категория fee tier
pub fn fee_tier_category(fee_rate: u32) -> &'static str {
    match fee_rate {
        0 => "Unknown",
        100 => "Ultra Low",
        500 => "Low",
        2500 => "Medium",
        10000 => "High",
        r if r < 500 => "Ultra Low",
        r if r < 2500 => "Low",
        r if r < 10000 => "Medium",
        _ => "High",
    }
}

/// Полное описание fee tier: "0.25% (Medium - Standard)"
pub fn fee_tier_description(fee_rate: u32) -> String {
    let category = fee_tier_category(fee_rate);
    let percentage = format_fee_tier(fee_rate);

    let description = match category {
        "Ultra Low" => "Stablecoins",
        "Low" => "Correlated",
        "Medium" => "Standard",
        "High" => "Exotic",
        _ => "",
    };

    if description.is_empty() {
        format!("{} ({})", percentage, category)
    } else {
        format!("{} ({} - {})", percentage, category, description)
    }
}

/// Вычислить fees за 24 часа из объема и fee rate
pub fn fees_from_volume(volume_24h: f64, fee_rate: u32) -> f64 {
    if fee_rate == 0 || volume_24h <= 0.0 {
        return 0.0;
    }
    volume_24h * (fee_rate as f64 / 10000.0) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fee_tier() {
        assert_eq!(format_fee_tier(100), "0.01%");
        assert_eq!(format_fee_tier(500), "0.05%");
        assert_eq!(format_fee_tier(2500), "0.25%");
        assert_eq!(format_fee_tier(10000), "1.00%");
        assert_eq!(format_fee_tier(0), "N/A");
    }

    #[test]
    fn test_fee_tier_category() {
        assert_eq!(fee_tier_category(100), "Ultra Low");
        assert_eq!(fee_tier_category(500), "Low");
        assert_eq!(fee_tier_category(2500), "Medium");
        assert_eq!(fee_tier_category(10000), "High");
        assert_eq!(fee_tier_category(3000), "Medium");
        assert_eq!(fee_tier_category(0), "Unknown");
    }

    #[test]
    fn test_fee_tier_description() {
        assert_eq!(fee_tier_description(2500), "0.25% (Medium - Standard)");
        assert_eq!(fee_tier_description(0), "N/A (Unknown)");
    }

    #[test]
    fn test_fees_from_volume() {
        // 0.25% от $1M объема
        assert_eq!(fees_from_volume(1_000_000.0, 2500), 2500.0);
        assert_eq!(fees_from_volume(0.0, 2500), 0.0);
        assert_eq!(fees_from_volume(1_000_000.0, 0), 0.0);
    }
}
