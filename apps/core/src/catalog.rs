//! Drone catalog: model codes, size bands and reference prices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A DJI Agras / Mavic model the bot can talk about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroneModel {
    T25P,
    T50,
    T70P,
    T100,
    Mavic3M,
}

impl DroneModel {
    /// Every model in display order.
    pub const ALL: [DroneModel; 5] = [
        DroneModel::T25P,
        DroneModel::T50,
        DroneModel::T70P,
        DroneModel::T100,
        DroneModel::Mavic3M,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DroneModel::T25P => "T25P",
            DroneModel::T50 => "T50",
            DroneModel::T70P => "T70P",
            DroneModel::T100 => "T100",
            DroneModel::Mavic3M => "Mavic3M",
        }
    }

    /// Size band shown in the model menu.
    pub fn band(&self) -> &'static str {
        match self {
            DroneModel::T25P => "Ideal para 100-300 ha",
            DroneModel::T50 => "Para 300-500 ha",
            DroneModel::T70P => "Para 500-800 ha",
            DroneModel::T100 => "Para más de 800 ha",
            DroneModel::Mavic3M => "Mapeo y monitoreo",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            DroneModel::Mavic3M => "📷",
            _ => "🚁",
        }
    }

    /// Reference list price in USD, quoted in recommendations.
    ///
    /// Binding quotes come from the external pricing sheet.
    pub fn reference_price_usd(&self) -> u32 {
        match self {
            DroneModel::T25P => 18_500,
            DroneModel::T50 => 27_900,
            DroneModel::T70P => 34_500,
            DroneModel::T100 => 42_000,
            DroneModel::Mavic3M => 6_900,
        }
    }

    /// Model recommended for a given surface.
    pub fn recommended_for(surface_ha: u32) -> DroneModel {
        match surface_ha {
            0..=300 => DroneModel::T25P,
            301..=500 => DroneModel::T50,
            _ => DroneModel::T100,
        }
    }
}

impl fmt::Display for DroneModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Multi-line model menu, one model per line with its size band.
pub fn model_menu() -> String {
    DroneModel::ALL
        .iter()
        .map(|m| format!("{} {} - {}", m.icon(), m.code(), m.band()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Price formatted with Spanish thousands separators ("USD 27.900").
pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("USD {}", grouped)
}
