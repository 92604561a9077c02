//! Italian/English UI texts.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Unknown codes fall back to Italian.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Language::English,
            "it" | "italian" | "italiano" => Language::Italian,
            _ => Language::default(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Italian => "Italiano",
            Language::English => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

pub trait Translations: Sync {
    fn app_title(&self) -> &'static str;
    fn setup_title(&self) -> &'static str;
    fn setup_description(&self) -> &'static str;
    fn select_data_folder(&self) -> &'static str;
    fn data_folder(&self) -> &'static str;
    fn total_entries(&self) -> &'static str;
    fn auto_save(&self) -> &'static str;
    fn no_entries(&self) -> &'static str;
    fn time(&self) -> &'static str;
    fn delete(&self) -> &'static str;
    fn save_success(&self) -> &'static str;
    fn save_failed(&self, detail: &str) -> String;

    /// Column label for a schema field key.
    fn field_label(&self, key: &str) -> &'static str;
    /// Instruction shown while the field is awaiting input.
    fn field_prompt(&self, key: &str) -> &'static str;
    fn field_placeholder(&self, key: &str) -> &'static str;
}

pub struct Italian;

impl Translations for Italian {
    fn app_title(&self) -> &'static str {
        "Scanner Prodotti"
    }
    fn setup_title(&self) -> &'static str {
        "Configurazione Scanner Prodotti"
    }
    fn setup_description(&self) -> &'static str {
        "Seleziona una cartella dove verranno salvati i file CSV."
    }
    fn select_data_folder(&self) -> &'static str {
        "Seleziona Cartella Dati"
    }
    fn data_folder(&self) -> &'static str {
        "Cartella dati:"
    }
    fn total_entries(&self) -> &'static str {
        "Totale prodotti oggi:"
    }
    fn auto_save(&self) -> &'static str {
        "Salvataggio automatico ogni 30 secondi"
    }
    fn no_entries(&self) -> &'static str {
        "Nessun prodotto inserito. Inizia a scansionare per aggiungere prodotti."
    }
    fn time(&self) -> &'static str {
        "Ora"
    }
    fn delete(&self) -> &'static str {
        "Elimina"
    }
    fn save_success(&self) -> &'static str {
        "Dati salvati con successo!"
    }
    fn save_failed(&self, detail: &str) -> String {
        format!("Salvataggio non riuscito: {detail}")
    }

    fn field_label(&self, key: &str) -> &'static str {
        match key {
            "productCode" => "Codice Prodotto",
            "serial" => "Numero di Serie",
            "lot" => "Lotto",
            "quantity" => "Quantità",
            "notes" => "Note",
            _ => "",
        }
    }
    fn field_prompt(&self, key: &str) -> &'static str {
        match key {
            "productCode" => "Scansiona Codice Prodotto",
            "serial" => "Scansiona Numero di Serie",
            "lot" => "Scansiona Lotto",
            "quantity" => "Inserisci Quantità (Opzionale)",
            "notes" => "Aggiungi Note (Opzionale)",
            _ => "",
        }
    }
    fn field_placeholder(&self, key: &str) -> &'static str {
        match key {
            "productCode" => "Codice prodotto...",
            "serial" => "Numero di serie...",
            "lot" => "Lotto...",
            "quantity" => "Quantità...",
            "notes" => "Note...",
            _ => "",
        }
    }
}

pub struct English;

impl Translations for English {
    fn app_title(&self) -> &'static str {
        "Product Scanner"
    }
    fn setup_title(&self) -> &'static str {
        "Product Scanner Setup"
    }
    fn setup_description(&self) -> &'static str {
        "Please select a folder where your CSV files will be saved."
    }
    fn select_data_folder(&self) -> &'static str {
        "Select Data Folder"
    }
    fn data_folder(&self) -> &'static str {
        "Data folder:"
    }
    fn total_entries(&self) -> &'static str {
        "Total entries today:"
    }
    fn auto_save(&self) -> &'static str {
        "Auto-saves every 30 seconds"
    }
    fn no_entries(&self) -> &'static str {
        "No entries yet. Start scanning to add products."
    }
    fn time(&self) -> &'static str {
        "Time"
    }
    fn delete(&self) -> &'static str {
        "Delete"
    }
    fn save_success(&self) -> &'static str {
        "Data saved successfully!"
    }
    fn save_failed(&self, detail: &str) -> String {
        format!("Save failed: {detail}")
    }

    fn field_label(&self, key: &str) -> &'static str {
        match key {
            "productCode" => "Product Code",
            "serial" => "Serial Number",
            "lot" => "Lot",
            "quantity" => "Quantity",
            "notes" => "Notes",
            _ => "",
        }
    }
    fn field_prompt(&self, key: &str) -> &'static str {
        match key {
            "productCode" => "Scan Product Code",
            "serial" => "Scan Product Serial Number",
            "lot" => "Scan Lot",
            "quantity" => "Enter Quantity (Optional)",
            "notes" => "Add Notes (Optional)",
            _ => "",
        }
    }
    fn field_placeholder(&self, key: &str) -> &'static str {
        match key {
            "productCode" => "Product code...",
            "serial" => "Product serial number...",
            "lot" => "Lot...",
            "quantity" => "Quantity...",
            "notes" => "Notes...",
            _ => "",
        }
    }
}

pub fn get_translations(lang: Language) -> &'static dyn Translations {
    match lang {
        Language::Italian => &Italian,
        Language::English => &English,
    }
}
