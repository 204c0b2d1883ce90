//! Scripted Spanish (rioplatense) texts.
//!
//! Variant lists use a `{name}` / `{model}` placeholder filled by the responder.

use crate::catalog::{format_usd, model_menu, DroneModel};

pub const GREETING: &str = "¡Hola! 👋 Soy Mavilda, tu asesora de drones agrícolas DJI de Seragro.\n\n¿Con quién tengo el gusto de hablar?";

pub const NAME_REPROMPT: &str =
    "Perdón, no llegué a entender tu nombre 😅\n\n¿Cómo te llamás?";

pub const WELCOME_VARIANTS: &[&str] = &[
    "¡Mucho gusto {name}! 🚁\n\n¿Qué superficie necesitás cubrir con el drone? (ej: 100 ha)",
    "¡Hola {name}, un placer! 🌱\n\nContame, ¿cuántas hectáreas trabajás y qué cultivos tenés?",
    "¡Genial {name}! 🚁 Te voy a ayudar a elegir el drone ideal.\n\n¿Cuántas hectáreas querés cubrir?",
];

pub const MODEL_FOLLOWUP_VARIANTS: &[&str] = &[
    "Excelente elección el {model}! ¿Qué te gustaría saber?\n\n• Precio y financiación\n• Especificaciones técnicas\n• Solicitar una demo\n• Rendimiento por hectárea",
    "¿Qué más te gustaría saber del {model}? 🚁\n\n• Precio\n• Ficha técnica\n• Financiación\n• Coordinar una demo",
    "Contame qué dudas tenés sobre el {model}. Te puedo pasar precio, ficha técnica o coordinar una demo en tu campo 🚁",
];

pub const FINANCING: &str = "tenemos excelentes planes de financiación:\n\n💳 Hasta 12 cuotas sin interés\n🏦 Leasing a 24-36 meses\n📊 Planes a medida según tu flujo\n\n¿Te gustaría que un asesor te contacte?";

pub const COMPARISON: &str = "Te resumo las diferencias según el tamaño de tu campo:\n\n🚁 T25P: compacto y fácil de trasladar, ideal para 100-300 ha\n🚁 T50: el más elegido, rinde en 300-500 ha\n🚁 T70P: más tanque y autonomía para 500-800 ha\n🚁 T100: máxima capacidad para más de 800 ha\n📷 Mavic3M: mapeo multiespectral y monitoreo de lotes\n\n¿Cuántas hectáreas trabajás así te digo cuál te conviene?";

pub const CROP_PROMPT: &str = "🌱 Los drones DJI son ideales para pulverizar tus cultivos con precisión y sin pisar el lote.\n\n¿Cuántas hectáreas tenés sembradas?";

pub const PROBLEM_PROMPT: &str = "🐛 Con el drone podés aplicar de forma localizada sobre plagas y malezas, ahorrando producto.\n\n¿Qué superficie necesitás tratar?";

/// "Pedro, " when a name is known, empty otherwise.
pub fn salute(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("{}, ", name),
        _ => String::new(),
    }
}

/// Uppercase the first letter (after any leading "¿").
fn sentence(text: String) -> String {
    match text.char_indices().find(|(_, c)| c.is_alphabetic()) {
        Some((i, c)) => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..i]);
            out.extend(c.to_uppercase());
            out.push_str(&text[i + c.len_utf8()..]);
            out
        }
        None => text,
    }
}

/// Address the reply to the user: "Pedro, ..." with the name exactly as
/// typed, or a capitalized sentence when no name is known.
fn addressed(name: Option<&str>, rest: String) -> String {
    let prefix = salute(name);
    if prefix.is_empty() {
        sentence(rest)
    } else {
        prefix + &rest
    }
}

pub fn fill_name(template: &str, name: &str) -> String {
    template.replace("{name}", name)
}

pub fn fill_model(template: &str, model: DroneModel) -> String {
    template.replace("{model}", model.code())
}

pub fn ask_model_for_price(name: Option<&str>) -> String {
    addressed(
        name,
        format!("¿de qué modelo querés saber el precio?\n\n{}", model_menu()),
    )
}

pub fn ask_model_for_specs(name: Option<&str>) -> String {
    addressed(
        name,
        format!(
            "¿de qué modelo querés ver las especificaciones técnicas?\n\n{}",
            model_menu()
        ),
    )
}

pub fn financing(name: Option<&str>) -> String {
    addressed(name, FINANCING.to_string())
}

/// Demo checklist. Known items are ticked, missing ones marked pending.
pub fn demo_checklist(name: Option<&str>, surface_ha: Option<u32>, phone_known: bool) -> String {
    let surface = match surface_ha {
        Some(ha) => format!("{} ha ✓", ha),
        None => "pendiente".to_string(),
    };
    let phone = if phone_known { "✓" } else { "pendiente" };
    let greeting = match name {
        Some(name) if !name.is_empty() => format!("¡Excelente {}!", name),
        _ => "¡Excelente!".to_string(),
    };
    format!(
        "{} Para coordinar una demo necesito:\n\n📍 Ubicación de tu campo (pendiente)\n📏 Superficie ({})\n📱 Teléfono de contacto ({})\n\n¿Me pasás estos datos?",
        greeting, surface, phone
    )
}

/// Pitch for the model recommended for a surface.
pub fn recommendation(surface_ha: u32, model: DroneModel) -> String {
    let pitch = match model {
        DroneModel::T25P => "Es compacto, fácil de trasladar entre lotes y cubre hasta 300 ha por campaña sin problema.",
        DroneModel::T50 => "Es el más elegido para campos medianos: tanque de 40 litros y gran rendimiento por hora.",
        _ => "Es el de máxima capacidad, pensado para grandes extensiones y aplicaciones de alto volumen.",
    };
    format!(
        "Para {} ha te recomiendo el {} 🚁\n\n{}\n💰 Precio de referencia: {}\n\n¿Querés coordinar una demo o ver opciones de financiación?",
        surface_ha,
        model.code(),
        pitch,
        format_usd(model.reference_price_usd())
    )
}

pub fn ask_surface(name: Option<&str>) -> String {
    addressed(
        name,
        "para recomendarte el equipo ideal necesito saber:\n\n📏 ¿Cuántas hectáreas trabajás?\n🌱 ¿Qué cultivos tenés?".to_string(),
    )
}

pub fn ask_phone(name: Option<&str>, model: DroneModel) -> String {
    addressed(
        name,
        format!(
            "¿me dejás tu celular o WhatsApp? 📱\n\nAsí te envío la ficha completa, videos y casos de uso del {}.",
            model.code()
        ),
    )
}

pub fn help_menu(name: Option<&str>) -> String {
    addressed(
        name,
        "¿en qué te puedo ayudar? 🚁\n\n• Conocer los modelos\n• Precios y financiación\n• Coordinar una demo\n• Comparar equipos".to_string(),
    )
}
