//! Static service taxonomy: categories, the tags (concrete services) under
//! each, and the search keywords that map free text onto them.
//!
//! Seeded once at compile time; slice order is the presentation order.
//! Keyword matching is accent-naive by design, so accented and unaccented
//! spellings appear as separate literal rows ("jardín" / "jardin"). Do not
//! collapse them with normalization.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i32,
    pub key: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTag {
    pub id: i32,
    pub category_id: i32,
    pub key: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryKeyword {
    pub id: i32,
    pub category_id: i32,
    pub keyword: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { id: 1, key: "plomeria", name: "Plomería" },
    Category { id: 2, key: "electricidad", name: "Electricidad" },
    Category { id: 3, key: "carpinteria", name: "Carpintería" },
    Category { id: 4, key: "pintura", name: "Pintura" },
    Category { id: 5, key: "jardineria", name: "Jardinería" },
    Category { id: 6, key: "limpieza", name: "Limpieza" },
    Category { id: 7, key: "albanileria", name: "Albañilería" },
    Category { id: 8, key: "cerrajeria", name: "Cerrajería" },
    Category { id: 9, key: "climatizacion", name: "Climatización" },
    Category { id: 10, key: "electrodomesticos", name: "Electrodomésticos" },
    Category { id: 11, key: "impermeabilizacion", name: "Impermeabilización" },
    Category { id: 12, key: "mudanzas", name: "Mudanzas" },
    Category { id: 13, key: "herreria", name: "Herrería" },
    Category { id: 14, key: "tablaroca", name: "Tablaroca" },
];

pub const CATEGORY_TAGS: &[CategoryTag] = &[
    CategoryTag { id: 1, category_id: 1, key: "reparacion_fugas", name: "Reparación de fugas" },
    CategoryTag { id: 2, category_id: 1, key: "destape_drenaje", name: "Destape de drenaje" },
    CategoryTag { id: 3, category_id: 1, key: "instalacion_sanitarios", name: "Instalación de sanitarios" },
    CategoryTag { id: 4, category_id: 1, key: "calentadores", name: "Calentadores y boilers" },
    CategoryTag { id: 5, category_id: 1, key: "tinacos_cisternas", name: "Tinacos y cisternas" },
    CategoryTag { id: 6, category_id: 2, key: "instalacion_electrica", name: "Instalación eléctrica" },
    CategoryTag { id: 7, category_id: 2, key: "cortos_circuitos", name: "Cortos circuitos" },
    CategoryTag { id: 8, category_id: 2, key: "iluminacion", name: "Iluminación" },
    CategoryTag { id: 9, category_id: 2, key: "contactos_apagadores", name: "Contactos y apagadores" },
    CategoryTag { id: 10, category_id: 2, key: "centro_carga", name: "Centro de carga" },
    CategoryTag { id: 11, category_id: 3, key: "muebles_medida", name: "Muebles a la medida" },
    CategoryTag { id: 12, category_id: 3, key: "puertas_madera", name: "Puertas de madera" },
    CategoryTag { id: 13, category_id: 3, key: "cocinas_integrales", name: "Cocinas integrales" },
    CategoryTag { id: 14, category_id: 3, key: "closets", name: "Clósets" },
    CategoryTag { id: 15, category_id: 3, key: "reparacion_muebles", name: "Reparación de muebles" },
    CategoryTag { id: 16, category_id: 4, key: "pintura_interior", name: "Pintura de interiores" },
    CategoryTag { id: 17, category_id: 4, key: "pintura_exterior", name: "Pintura de exteriores" },
    CategoryTag { id: 18, category_id: 4, key: "resanado", name: "Resanado y acabados" },
    CategoryTag { id: 19, category_id: 4, key: "texturizados", name: "Texturizados" },
    CategoryTag { id: 20, category_id: 5, key: "poda", name: "Poda de árboles y setos" },
    CategoryTag { id: 21, category_id: 5, key: "mantenimiento_jardin", name: "Mantenimiento de jardín" },
    CategoryTag { id: 22, category_id: 5, key: "sistemas_riego", name: "Sistemas de riego" },
    CategoryTag { id: 23, category_id: 5, key: "diseno_jardines", name: "Diseño de jardines" },
    CategoryTag { id: 24, category_id: 6, key: "limpieza_profunda", name: "Limpieza profunda" },
    CategoryTag { id: 25, category_id: 6, key: "limpieza_obra", name: "Limpieza fin de obra" },
    CategoryTag { id: 26, category_id: 6, key: "lavado_tapiceria", name: "Lavado de salas y tapicería" },
    CategoryTag { id: 27, category_id: 6, key: "limpieza_vidrios", name: "Limpieza de vidrios" },
    CategoryTag { id: 28, category_id: 7, key: "muros", name: "Muros y aplanados" },
    CategoryTag { id: 29, category_id: 7, key: "pisos_azulejos", name: "Pisos y azulejos" },
    CategoryTag { id: 30, category_id: 7, key: "bardas", name: "Bardas" },
    CategoryTag { id: 31, category_id: 7, key: "remodelacion", name: "Remodelación" },
    CategoryTag { id: 32, category_id: 8, key: "apertura_puertas", name: "Apertura de puertas" },
    CategoryTag { id: 33, category_id: 8, key: "cambio_cerraduras", name: "Cambio de cerraduras" },
    CategoryTag { id: 34, category_id: 8, key: "duplicado_llaves", name: "Duplicado de llaves" },
    CategoryTag { id: 35, category_id: 8, key: "cerraduras_inteligentes", name: "Cerraduras inteligentes" },
    CategoryTag { id: 36, category_id: 9, key: "instalacion_minisplit", name: "Instalación de minisplit" },
    CategoryTag { id: 37, category_id: 9, key: "mantenimiento_aire", name: "Mantenimiento de aire acondicionado" },
    CategoryTag { id: 38, category_id: 9, key: "carga_gas", name: "Carga de gas refrigerante" },
    CategoryTag { id: 39, category_id: 9, key: "calefaccion", name: "Calefacción" },
    CategoryTag { id: 40, category_id: 10, key: "lavadoras", name: "Lavadoras" },
    CategoryTag { id: 41, category_id: 10, key: "refrigeradores", name: "Refrigeradores" },
    CategoryTag { id: 42, category_id: 10, key: "estufas_hornos", name: "Estufas y hornos" },
    CategoryTag { id: 43, category_id: 10, key: "secadoras", name: "Secadoras" },
    CategoryTag { id: 44, category_id: 11, key: "azoteas", name: "Azoteas" },
    CategoryTag { id: 45, category_id: 11, key: "losas", name: "Losas" },
    CategoryTag { id: 46, category_id: 11, key: "sellado_grietas", name: "Sellado de grietas" },
    CategoryTag { id: 47, category_id: 11, key: "aislamiento_termico", name: "Aislamiento térmico" },
    CategoryTag { id: 48, category_id: 12, key: "mudanza_local", name: "Mudanza local" },
    CategoryTag { id: 49, category_id: 12, key: "mudanza_foranea", name: "Mudanza foránea" },
    CategoryTag { id: 50, category_id: 12, key: "embalaje", name: "Embalaje" },
    CategoryTag { id: 51, category_id: 12, key: "fletes", name: "Fletes" },
    CategoryTag { id: 52, category_id: 13, key: "portones", name: "Portones" },
    CategoryTag { id: 53, category_id: 13, key: "protecciones", name: "Protecciones para ventanas" },
    CategoryTag { id: 54, category_id: 13, key: "barandales", name: "Barandales" },
    CategoryTag { id: 55, category_id: 13, key: "soldadura", name: "Soldadura en general" },
    CategoryTag { id: 56, category_id: 14, key: "muros_divisorios", name: "Muros divisorios" },
    CategoryTag { id: 57, category_id: 14, key: "plafones", name: "Plafones" },
    CategoryTag { id: 58, category_id: 14, key: "nichos_repisas", name: "Nichos y repisas" },
];

pub const CATEGORY_KEYWORDS: &[CategoryKeyword] = &[
    CategoryKeyword { id: 1, category_id: 1, keyword: "fuga" },
    CategoryKeyword { id: 2, category_id: 1, keyword: "fugas" },
    CategoryKeyword { id: 3, category_id: 1, keyword: "tuberia" },
    CategoryKeyword { id: 4, category_id: 1, keyword: "tubería" },
    CategoryKeyword { id: 5, category_id: 1, keyword: "drenaje" },
    CategoryKeyword { id: 6, category_id: 1, keyword: "destape" },
    CategoryKeyword { id: 7, category_id: 1, keyword: "wc" },
    CategoryKeyword { id: 8, category_id: 1, keyword: "baño" },
    CategoryKeyword { id: 9, category_id: 1, keyword: "bano" },
    CategoryKeyword { id: 10, category_id: 1, keyword: "lavabo" },
    CategoryKeyword { id: 11, category_id: 1, keyword: "boiler" },
    CategoryKeyword { id: 12, category_id: 1, keyword: "calentador" },
    CategoryKeyword { id: 13, category_id: 1, keyword: "regadera" },
    CategoryKeyword { id: 14, category_id: 1, keyword: "llave de agua" },
    CategoryKeyword { id: 15, category_id: 1, keyword: "cisterna" },
    CategoryKeyword { id: 16, category_id: 1, keyword: "tinaco" },
    CategoryKeyword { id: 17, category_id: 1, keyword: "coladera" },
    CategoryKeyword { id: 18, category_id: 1, keyword: "plomero" },
    CategoryKeyword { id: 19, category_id: 2, keyword: "luz" },
    CategoryKeyword { id: 20, category_id: 2, keyword: "corto" },
    CategoryKeyword { id: 21, category_id: 2, keyword: "apagador" },
    CategoryKeyword { id: 22, category_id: 2, keyword: "contacto" },
    CategoryKeyword { id: 23, category_id: 2, keyword: "enchufe" },
    CategoryKeyword { id: 24, category_id: 2, keyword: "foco" },
    CategoryKeyword { id: 25, category_id: 2, keyword: "lampara" },
    CategoryKeyword { id: 26, category_id: 2, keyword: "lámpara" },
    CategoryKeyword { id: 27, category_id: 2, keyword: "cableado" },
    CategoryKeyword { id: 28, category_id: 2, keyword: "electricista" },
    CategoryKeyword { id: 29, category_id: 2, keyword: "pastilla" },
    CategoryKeyword { id: 30, category_id: 2, keyword: "breaker" },
    CategoryKeyword { id: 31, category_id: 2, keyword: "ventilador de techo" },
    CategoryKeyword { id: 32, category_id: 3, keyword: "madera" },
    CategoryKeyword { id: 33, category_id: 3, keyword: "mueble" },
    CategoryKeyword { id: 34, category_id: 3, keyword: "muebles" },
    CategoryKeyword { id: 35, category_id: 3, keyword: "puerta" },
    CategoryKeyword { id: 36, category_id: 3, keyword: "closet" },
    CategoryKeyword { id: 37, category_id: 3, keyword: "clóset" },
    CategoryKeyword { id: 38, category_id: 3, keyword: "cocina integral" },
    CategoryKeyword { id: 39, category_id: 3, keyword: "repisa" },
    CategoryKeyword { id: 40, category_id: 3, keyword: "barniz" },
    CategoryKeyword { id: 41, category_id: 3, keyword: "carpintero" },
    CategoryKeyword { id: 42, category_id: 3, keyword: "cajones" },
    CategoryKeyword { id: 43, category_id: 4, keyword: "pintar" },
    CategoryKeyword { id: 44, category_id: 4, keyword: "pintor" },
    CategoryKeyword { id: 45, category_id: 4, keyword: "brocha" },
    CategoryKeyword { id: 46, category_id: 4, keyword: "rodillo" },
    CategoryKeyword { id: 47, category_id: 4, keyword: "resane" },
    CategoryKeyword { id: 48, category_id: 4, keyword: "gotele" },
    CategoryKeyword { id: 49, category_id: 4, keyword: "esmalte" },
    CategoryKeyword { id: 50, category_id: 4, keyword: "vinilica" },
    CategoryKeyword { id: 51, category_id: 4, keyword: "vinílica" },
    CategoryKeyword { id: 52, category_id: 4, keyword: "fachada" },
    CategoryKeyword { id: 53, category_id: 5, keyword: "jardin" },
    CategoryKeyword { id: 54, category_id: 5, keyword: "jardín" },
    CategoryKeyword { id: 55, category_id: 5, keyword: "pasto" },
    CategoryKeyword { id: 56, category_id: 5, keyword: "poda" },
    CategoryKeyword { id: 57, category_id: 5, keyword: "podar" },
    CategoryKeyword { id: 58, category_id: 5, keyword: "arbol" },
    CategoryKeyword { id: 59, category_id: 5, keyword: "árbol" },
    CategoryKeyword { id: 60, category_id: 5, keyword: "riego" },
    CategoryKeyword { id: 61, category_id: 5, keyword: "cesped" },
    CategoryKeyword { id: 62, category_id: 5, keyword: "césped" },
    CategoryKeyword { id: 63, category_id: 5, keyword: "plantas" },
    CategoryKeyword { id: 64, category_id: 5, keyword: "jardinero" },
    CategoryKeyword { id: 65, category_id: 5, keyword: "setos" },
    CategoryKeyword { id: 66, category_id: 6, keyword: "aseo" },
    CategoryKeyword { id: 67, category_id: 6, keyword: "limpieza profunda" },
    CategoryKeyword { id: 68, category_id: 6, keyword: "alfombra" },
    CategoryKeyword { id: 69, category_id: 6, keyword: "tapiceria" },
    CategoryKeyword { id: 70, category_id: 6, keyword: "tapicería" },
    CategoryKeyword { id: 71, category_id: 6, keyword: "vidrios" },
    CategoryKeyword { id: 72, category_id: 6, keyword: "cristales" },
    CategoryKeyword { id: 73, category_id: 6, keyword: "desinfeccion" },
    CategoryKeyword { id: 74, category_id: 6, keyword: "desinfección" },
    CategoryKeyword { id: 75, category_id: 6, keyword: "fin de obra" },
    CategoryKeyword { id: 76, category_id: 7, keyword: "albañil" },
    CategoryKeyword { id: 77, category_id: 7, keyword: "albanil" },
    CategoryKeyword { id: 78, category_id: 7, keyword: "cemento" },
    CategoryKeyword { id: 79, category_id: 7, keyword: "tabique" },
    CategoryKeyword { id: 80, category_id: 7, keyword: "muro" },
    CategoryKeyword { id: 81, category_id: 7, keyword: "azulejo" },
    CategoryKeyword { id: 82, category_id: 7, keyword: "loseta" },
    CategoryKeyword { id: 83, category_id: 7, keyword: "piso" },
    CategoryKeyword { id: 84, category_id: 7, keyword: "barda" },
    CategoryKeyword { id: 85, category_id: 7, keyword: "firme" },
    CategoryKeyword { id: 86, category_id: 7, keyword: "aplanado" },
    CategoryKeyword { id: 87, category_id: 8, keyword: "cerradura" },
    CategoryKeyword { id: 88, category_id: 8, keyword: "chapa" },
    CategoryKeyword { id: 89, category_id: 8, keyword: "llave" },
    CategoryKeyword { id: 90, category_id: 8, keyword: "llaves" },
    CategoryKeyword { id: 91, category_id: 8, keyword: "candado" },
    CategoryKeyword { id: 92, category_id: 8, keyword: "cerrajero" },
    CategoryKeyword { id: 93, category_id: 8, keyword: "puerta cerrada" },
    CategoryKeyword { id: 94, category_id: 8, keyword: "duplicado" },
    CategoryKeyword { id: 95, category_id: 9, keyword: "aire acondicionado" },
    CategoryKeyword { id: 96, category_id: 9, keyword: "minisplit" },
    CategoryKeyword { id: 97, category_id: 9, keyword: "clima" },
    CategoryKeyword { id: 98, category_id: 9, keyword: "refrigerante" },
    CategoryKeyword { id: 99, category_id: 9, keyword: "calefaccion" },
    CategoryKeyword { id: 100, category_id: 9, keyword: "calefacción" },
    CategoryKeyword { id: 101, category_id: 9, keyword: "ventilacion" },
    CategoryKeyword { id: 102, category_id: 9, keyword: "ventilación" },
    CategoryKeyword { id: 103, category_id: 9, keyword: "split" },
    CategoryKeyword { id: 104, category_id: 10, keyword: "lavadora" },
    CategoryKeyword { id: 105, category_id: 10, keyword: "refrigerador" },
    CategoryKeyword { id: 106, category_id: 10, keyword: "refri" },
    CategoryKeyword { id: 107, category_id: 10, keyword: "estufa" },
    CategoryKeyword { id: 108, category_id: 10, keyword: "horno" },
    CategoryKeyword { id: 109, category_id: 10, keyword: "secadora" },
    CategoryKeyword { id: 110, category_id: 10, keyword: "lavavajillas" },
    CategoryKeyword { id: 111, category_id: 10, keyword: "microondas" },
    CategoryKeyword { id: 112, category_id: 10, keyword: "linea blanca" },
    CategoryKeyword { id: 113, category_id: 10, keyword: "línea blanca" },
    CategoryKeyword { id: 114, category_id: 11, keyword: "impermeabilizante" },
    CategoryKeyword { id: 115, category_id: 11, keyword: "gotera" },
    CategoryKeyword { id: 116, category_id: 11, keyword: "goteras" },
    CategoryKeyword { id: 117, category_id: 11, keyword: "humedad" },
    CategoryKeyword { id: 118, category_id: 11, keyword: "azotea" },
    CategoryKeyword { id: 119, category_id: 11, keyword: "losa" },
    CategoryKeyword { id: 120, category_id: 11, keyword: "grieta" },
    CategoryKeyword { id: 121, category_id: 11, keyword: "filtracion" },
    CategoryKeyword { id: 122, category_id: 11, keyword: "filtración" },
    CategoryKeyword { id: 123, category_id: 12, keyword: "mudanza" },
    CategoryKeyword { id: 124, category_id: 12, keyword: "flete" },
    CategoryKeyword { id: 125, category_id: 12, keyword: "embalaje" },
    CategoryKeyword { id: 126, category_id: 12, keyword: "cajas" },
    CategoryKeyword { id: 127, category_id: 12, keyword: "camion" },
    CategoryKeyword { id: 128, category_id: 12, keyword: "camión" },
    CategoryKeyword { id: 129, category_id: 12, keyword: "traslado" },
    CategoryKeyword { id: 130, category_id: 13, keyword: "herrero" },
    CategoryKeyword { id: 131, category_id: 13, keyword: "porton" },
    CategoryKeyword { id: 132, category_id: 13, keyword: "portón" },
    CategoryKeyword { id: 133, category_id: 13, keyword: "reja" },
    CategoryKeyword { id: 134, category_id: 13, keyword: "protecciones" },
    CategoryKeyword { id: 135, category_id: 13, keyword: "soldar" },
    CategoryKeyword { id: 136, category_id: 13, keyword: "soldadura" },
    CategoryKeyword { id: 137, category_id: 13, keyword: "barandal" },
    CategoryKeyword { id: 138, category_id: 13, keyword: "fierro" },
    CategoryKeyword { id: 139, category_id: 14, keyword: "plafon" },
    CategoryKeyword { id: 140, category_id: 14, keyword: "plafón" },
    CategoryKeyword { id: 141, category_id: 14, keyword: "durock" },
    CategoryKeyword { id: 142, category_id: 14, keyword: "panel de yeso" },
    CategoryKeyword { id: 143, category_id: 14, keyword: "muro divisorio" },
    CategoryKeyword { id: 144, category_id: 14, keyword: "nicho" },
];
