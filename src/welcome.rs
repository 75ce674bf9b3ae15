//! The schema graph for the `studiewijzeritemafspraaktoekenningen` response.
//!
//! Wire names are the service's own and must match byte for byte; internal names follow
//! Rust field naming so the typed model in [`crate::model`] needs no renames.
use once_cell::sync::Lazy;

use crate::schema::{Additional, Property, Registry, SchemaNode};

pub const ROOT: &str = "Welcome";

/// Process-wide registry, built on first use.
pub static WELCOME: Lazy<Registry> = Lazy::new(registry);

pub const TYPES: [&str; 6] = [
    "instelling.RVestiging",
    "lesgroep.RLesgroep",
    "onderwijsinrichting.RSchooljaar",
    "onderwijsinrichting.RVak",
    "studiewijzer.RSWIAfspraakToekenning",
    "studiewijzer.RStudiewijzerItem",
];

fn r(name: &str) -> SchemaNode {
    SchemaNode::reference(name)
}

fn list_of(name: &str) -> SchemaNode {
    SchemaNode::array(r(name))
}

fn strict(properties: Vec<Property>) -> SchemaNode {
    SchemaNode::object(properties, Additional::Forbid)
}

/// `links`, `permissions` and `additionalObjects` open almost every resource.
fn resource_header() -> Vec<Property> {
    vec![
        Property::plain("links", list_of("Link")),
        Property::plain("permissions", list_of("Permission")),
        Property::new("additionalObjects", "additional_objects", r("AdditionalObjects")),
    ]
}

fn with_header(rest: Vec<Property>) -> SchemaNode {
    let mut properties = resource_header();
    properties.extend(rest);
    strict(properties)
}

pub fn registry() -> Registry {
    use crate::schema::SchemaNode as S;

    let type_tag = || Property::new("$type", "type", r("Type"));

    let item = {
        let mut properties = vec![type_tag()];
        properties.extend(resource_header());
        properties.extend([
            Property::new("studiewijzerItem", "studiewijzer_item", r("StudiewijzerItem")),
            Property::plain("sortering", S::number()),
            Property::plain("lesgroep", r("Lesgroep")),
            Property::new("datumTijd", "datum_tijd", S::timestamp()),
            Property::new("aangemaaktOpDatumTijd", "aangemaakt_op_datum_tijd", S::optional(S::timestamp())),
        ]);
        strict(properties)
    };

    let schooljaar = {
        let mut properties = vec![type_tag()];
        properties.extend(resource_header());
        properties.extend([
            Property::plain("naam", r("SchooljaarNaam")),
            Property::new("vanafDatum", "vanaf_datum", S::timestamp()),
            Property::new("totDatum", "tot_datum", S::timestamp()),
            Property::new("isHuidig", "is_huidig", S::boolean()),
        ]);
        strict(properties)
    };

    Registry::new()
        .with(ROOT, strict(vec![Property::plain("items", list_of("Item"))]))
        .with("Item", item)
        .with("AdditionalObjects", strict(vec![]))
        .with(
            "Lesgroep",
            with_header(vec![
                Property::new("UUID", "uuid", S::string()),
                Property::plain("naam", S::string()),
                Property::plain("omschrijving", S::string()),
                Property::plain("schooljaar", r("Schooljaar")),
                Property::plain("vak", r("Vak")),
                Property::new("heeftStamgroep", "heeft_stamgroep", S::boolean()),
                Property::new("examendossierOndersteund", "examendossier_ondersteund", S::boolean()),
                Property::plain("vestiging", r("Vestiging")),
            ]),
        )
        .with(
            "Link",
            strict(vec![
                Property::plain("id", S::number()),
                Property::plain("rel", r("Rel")),
                Property::plain("type", r("Type")),
                Property::plain("href", S::string()),
            ]),
        )
        .with(
            "Permission",
            strict(vec![
                Property::plain("full", S::string()),
                Property::plain("type", r("Type")),
                Property::plain("operations", list_of("Operation")),
                Property::plain("instances", S::array(S::string())),
            ]),
        )
        .with("Schooljaar", schooljaar)
        .with(
            "Vak",
            with_header(vec![
                Property::plain("afkorting", S::string()),
                Property::plain("naam", S::string()),
                Property::new("UUID", "uuid", S::string()),
            ]),
        )
        .with(
            "Vestiging",
            with_header(vec![
                Property::plain("naam", r("VestigingNaam")),
                Property::plain("uuid", S::string()),
            ]),
        )
        .with(
            "StudiewijzerItem",
            with_header(vec![
                Property::plain("onderwerp", S::string()),
                Property::new("huiswerkType", "huiswerk_type", r("HuiswerkType")),
                Property::plain("omschrijving", S::string()),
                Property::plain("inleverperiodes", S::boolean()),
                Property::plain("lesmateriaal", S::boolean()),
                Property::plain("projectgroepen", S::boolean()),
                Property::plain("bijlagen", S::array(S::any())),
                Property::new("externeMaterialen", "externe_materialen", S::array(S::any())),
                Property::plain("inlevermomenten", S::array(S::any())),
                Property::plain("tonen", S::boolean()),
                Property::new("notitieZichtbaarVoorLeerling", "notitie_zichtbaar_voor_leerling", S::boolean()),
                Property::plain("leerdoelen", S::string()),
            ]),
        )
        .with("Type", S::literals(TYPES))
        .with("Rel", S::literals(["self"]))
        .with("Operation", S::literals(["READ"]))
        .with("SchooljaarNaam", S::literals(["2024/2025"]))
        .with("VestigingNaam", S::literals(["Revius Lyceum Doorn"]))
        .with("HuiswerkType", S::literals(["HUISWERK"]))
}
