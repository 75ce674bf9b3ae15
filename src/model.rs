//! Typed view of a validated `Welcome` document.
//!
//! Field names are the internal names declared in [`crate::welcome`]. Values only reach
//! these structs after the schema engine has accepted them, so every field is exactly as
//! wide as its schema: timestamps may be null and numbers keep their JSON form.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Welcome {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub type_: Type,
    pub links: Vec<Link>,
    pub permissions: Vec<Permission>,
    pub additional_objects: AdditionalObjects,
    pub studiewijzer_item: StudiewijzerItem,
    pub sortering: Number,
    pub lesgroep: Lesgroep,
    /// Null on the wire stays null.
    pub datum_tijd: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aangemaakt_op_datum_tijd: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    #[serde(rename = "instelling.RVestiging")]
    InstellingRVestiging,
    #[serde(rename = "lesgroep.RLesgroep")]
    LesgroepRLesgroep,
    #[serde(rename = "onderwijsinrichting.RSchooljaar")]
    OnderwijsinrichtingRSchooljaar,
    #[serde(rename = "onderwijsinrichting.RVak")]
    OnderwijsinrichtingRVak,
    #[serde(rename = "studiewijzer.RSWIAfspraakToekenning")]
    StudiewijzerRSwiAfspraakToekenning,
    #[serde(rename = "studiewijzer.RStudiewijzerItem")]
    StudiewijzerRStudiewijzerItem,
}

/// Always `{}` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalObjects {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: Number,
    pub rel: Rel,
    #[serde(rename = "type")]
    pub type_: Type,
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rel {
    #[serde(rename = "self")]
    SelfLink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub full: String,
    #[serde(rename = "type")]
    pub type_: Type,
    pub operations: Vec<Operation>,
    pub instances: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "READ")]
    Read,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesgroep {
    pub links: Vec<Link>,
    pub permissions: Vec<Permission>,
    pub additional_objects: AdditionalObjects,
    pub uuid: String,
    pub naam: String,
    pub omschrijving: String,
    pub schooljaar: Schooljaar,
    pub vak: Vak,
    pub heeft_stamgroep: bool,
    pub examendossier_ondersteund: bool,
    pub vestiging: Vestiging,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schooljaar {
    #[serde(rename = "type")]
    pub type_: Type,
    pub links: Vec<Link>,
    pub permissions: Vec<Permission>,
    pub additional_objects: AdditionalObjects,
    pub naam: SchooljaarNaam,
    pub vanaf_datum: Option<DateTime<Utc>>,
    pub tot_datum: Option<DateTime<Utc>>,
    pub is_huidig: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchooljaarNaam {
    #[serde(rename = "2024/2025")]
    Jaar2024Tot2025,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vak {
    pub links: Vec<Link>,
    pub permissions: Vec<Permission>,
    pub additional_objects: AdditionalObjects,
    pub afkorting: String,
    pub naam: String,
    pub uuid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vestiging {
    pub links: Vec<Link>,
    pub permissions: Vec<Permission>,
    pub additional_objects: AdditionalObjects,
    pub naam: VestigingNaam,
    pub uuid: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VestigingNaam {
    #[serde(rename = "Revius Lyceum Doorn")]
    ReviusLyceumDoorn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudiewijzerItem {
    pub links: Vec<Link>,
    pub permissions: Vec<Permission>,
    pub additional_objects: AdditionalObjects,
    pub onderwerp: String,
    pub huiswerk_type: HuiswerkType,
    pub omschrijving: String,
    pub inleverperiodes: bool,
    pub lesmateriaal: bool,
    pub projectgroepen: bool,
    pub bijlagen: Vec<Value>,
    pub externe_materialen: Vec<Value>,
    pub inlevermomenten: Vec<Value>,
    pub tonen: bool,
    pub notitie_zichtbaar_voor_leerling: bool,
    pub leerdoelen: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HuiswerkType {
    #[serde(rename = "HUISWERK")]
    Huiswerk,
}
