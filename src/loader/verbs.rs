//! `verbs.toml` loading: author-declared verbs layered on top of the
//! engine's default verb table.

#[derive(Debug, Default, serde::Deserialize)]
pub struct VerbsFile {
    #[serde(default)]
    pub verb: Vec<VerbDef>,
}

#[derive(Debug, serde::Deserialize)]
pub struct VerbDef {
    pub canonical: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

#[must_use]
pub fn author_verbs(file: &VerbsFile) -> Vec<(String, Vec<String>)> {
    file.verb.iter().map(|def| (def.canonical.clone(), def.synonyms.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_custom_verb_with_synonyms() {
        let file: VerbsFile = toml::from_str(
            r#"
            [[verb]]
            canonical = "pray"
            synonyms = ["kneel"]
        "#,
        )
        .unwrap();
        let verbs = author_verbs(&file);
        assert_eq!(verbs, vec![("pray".to_string(), vec!["kneel".to_string()])]);
    }
}
