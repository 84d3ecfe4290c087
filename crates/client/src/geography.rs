//! Client for the IBGE localities catalog (Brazilian states and their
//! municipalities).

use serde::{Deserialize, Serialize};

use crate::directory::parse_response;
use crate::error::ClientError;

pub const DEFAULT_IBGE_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

/// A federative unit. The catalog names fields in Portuguese.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    /// Two-letter code (UF), e.g. `RJ`.
    #[serde(rename = "sigla")]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

pub struct GeographyClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeographyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `GET {base}/estados`
    pub async fn states(&self) -> Result<Vec<State>, ClientError> {
        let response = self
            .client
            .get(format!("{}/estados", self.base_url))
            .send()
            .await?;

        parse_response(response).await
    }

    /// `GET {base}/estados/{uf}/municipios`
    pub async fn cities(&self, uf: &str) -> Result<Vec<City>, ClientError> {
        let response = self
            .client
            .get(format!("{}/estados/{}/municipios", self.base_url, uf))
            .send()
            .await?;

        parse_response(response).await
    }
}

impl Default for GeographyClient {
    fn default() -> Self {
        Self::new(DEFAULT_IBGE_URL)
    }
}

/// Find a state by its code, ignoring case.
pub fn find_state<'a>(states: &'a [State], code: &str) -> Option<&'a State> {
    states.iter().find(|s| s.code.eq_ignore_ascii_case(code))
}

/// Find a city by name, ignoring case.
pub fn find_city<'a>(cities: &'a [City], name: &str) -> Option<&'a City> {
    let name = name.trim().to_lowercase();
    cities.iter().find(|c| c.name.to_lowercase() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> Vec<State> {
        serde_json::from_str(
            r#"[{"id":33,"sigla":"RJ","nome":"Rio de Janeiro","regiao":{"id":3}},
                {"id":35,"sigla":"SP","nome":"São Paulo"}]"#,
        )
        .unwrap()
    }

    #[test]
    fn catalog_fields_are_renamed() {
        let states = states();
        assert_eq!(states[0].code, "RJ");
        assert_eq!(states[0].name, "Rio de Janeiro");
    }

    #[test]
    fn state_lookup_ignores_case() {
        let states = states();
        assert_eq!(find_state(&states, "sp").map(|s| s.id), Some(35));
        assert!(find_state(&states, "MG").is_none());
    }

    #[test]
    fn city_lookup_ignores_case_and_padding() {
        let cities = vec![
            City { id: 1, name: "Niterói".into() },
            City { id: 2, name: "Rio de Janeiro".into() },
        ];
        assert_eq!(find_city(&cities, " rio de janeiro ").map(|c| c.id), Some(2));
        assert_eq!(find_city(&cities, "NITERÓI").map(|c| c.id), Some(1));
        assert!(find_city(&cities, "Santos").is_none());
    }
}
