//! Trichoscopy literature cited in evaluation reports.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationKind {
    Article,
    Book,
    Chapter,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub id: &'static str,
    pub authors: &'static str,
    pub title: &'static str,
    pub journal: &'static str,
    pub year: u16,
    pub volume: Option<&'static str>,
    pub pages: Option<&'static str>,
    pub doi: Option<&'static str>,
    pub kind: PublicationKind,
    pub relevance: Relevance,
    pub description: &'static str,
}

static CATALOG: [Reference; 8] = [
    Reference {
        id: "rudnicka-2008",
        authors: "Rudnicka, L., Olszewska, M., Rakowska, A., Kowalska-Oledzka, E., & Slowinska, M.",
        title: "Hair shafts in trichoscopy: clues for diagnosis of hair and scalp diseases",
        journal: "Dermatologic Clinics",
        year: 2008,
        volume: Some("26"),
        pages: Some("23-34"),
        doi: Some("10.1016/j.det.2007.10.002"),
        kind: PublicationKind::Article,
        relevance: Relevance::High,
        description: "Fundamental para compreensão dos padrões tricoscópicos e diagnóstico diferencial de doenças capilares.",
    },
    Reference {
        id: "ross-2008",
        authors: "Ross, E.K., Vincenzi, C., & Tosti, A.",
        title: "Videodermoscopy in the evaluation of hair and scalp disorders",
        journal: "Journal of the American Academy of Dermatology",
        year: 2008,
        volume: Some("59"),
        pages: Some("78-84"),
        doi: Some("10.1016/j.jaad.2008.01.001"),
        kind: PublicationKind::Article,
        relevance: Relevance::High,
        description: "Metodologia de videodermoscopia aplicada à avaliação de distúrbios capilares e do couro cabeludo.",
    },
    Reference {
        id: "miteva-2012",
        authors: "Miteva, M., & Tosti, A.",
        title: "Hair and scalp dermatoscopy",
        journal: "Journal of the American Academy of Dermatology",
        year: 2012,
        volume: Some("67"),
        pages: Some("1040-1048"),
        doi: Some("10.1016/j.jaad.2012.02.003"),
        kind: PublicationKind::Article,
        relevance: Relevance::High,
        description: "Revisão abrangente sobre dermatoscopia capilar e suas aplicações clínicas.",
    },
    Reference {
        id: "rakowska-2009",
        authors: "Rakowska, A., Slowinska, M., Kowalska-Oledzka, E., Rudnicka, L.",
        title: "Dermoscopy in female androgenic alopecia: method standardization and diagnostic criteria",
        journal: "International Journal of Trichology",
        year: 2009,
        volume: Some("1"),
        pages: Some("123-130"),
        doi: Some("10.4103/0974-7753.58552"),
        kind: PublicationKind::Article,
        relevance: Relevance::High,
        description: "Critérios diagnósticos padronizados para alopecia androgênica feminina via dermoscopia.",
    },
    Reference {
        id: "lacarrubba-2016",
        authors: "Lacarrubba, F., Micali, G., & Tosti, A.",
        title: "Scalp dermoscopy or trichoscopy",
        journal: "Current Problems in Dermatology",
        year: 2016,
        volume: Some("47"),
        pages: Some("21-32"),
        doi: Some("10.1159/000446039"),
        kind: PublicationKind::Chapter,
        relevance: Relevance::Medium,
        description: "Técnicas avançadas de tricoscopia e interpretação de achados.",
    },
    Reference {
        id: "rudnicka-2018",
        authors: "Rudnicka, L., Rakowska, A., & Olszewska, M.",
        title: "Trichoscopy: a new method for diagnosing hair loss",
        journal: "Journal of Drugs in Dermatology",
        year: 2018,
        volume: Some("17"),
        pages: Some("S1-S8"),
        doi: None,
        kind: PublicationKind::Review,
        relevance: Relevance::High,
        description: "Atualização sobre metodologia tricoscópica e novos critérios diagnósticos.",
    },
    Reference {
        id: "kumar-2019",
        authors: "Kumar, A., Garg, A., & Garg, S.",
        title: "Trichoscopy in alopecia areata",
        journal: "Indian Journal of Dermatology, Venereology and Leprology",
        year: 2019,
        volume: Some("85"),
        pages: Some("347-352"),
        doi: Some("10.4103/ijdvl.IJDVL_1000_18"),
        kind: PublicationKind::Article,
        relevance: Relevance::Medium,
        description: "Aplicação específica da tricoscopia no diagnóstico e acompanhamento da alopecia areata.",
    },
    Reference {
        id: "piracini-2014",
        authors: "Piracini, B.M., & Alessandrini, A.",
        title: "Dermoscopy of hair and scalp disorders with clinical and pathological correlations",
        journal: "Dermatologic Clinics",
        year: 2014,
        volume: Some("32"),
        pages: Some("1-8"),
        doi: Some("10.1016/j.det.2013.08.001"),
        kind: PublicationKind::Article,
        relevance: Relevance::High,
        description: "Correlação entre achados tricoscópicos e histopatológicos para diagnóstico preciso.",
    },
];

pub fn catalog() -> &'static [Reference] {
    &CATALOG
}

/// Numbered citations of the high-relevance entries, one per line.
pub fn citation_list() -> String {
    by_relevance(Relevance::High)
        .enumerate()
        .map(|(index, reference)| {
            let mut citation = format!(
                "{}. {} ({}). {}. {}",
                index + 1,
                reference.authors,
                reference.year,
                reference.title,
                reference.journal
            );
            if let Some(volume) = reference.volume {
                citation.push_str(&format!(", {volume}"));
            }
            if let Some(pages) = reference.pages {
                citation.push_str(&format!(", {pages}"));
            }
            if let Some(doi) = reference.doi {
                citation.push_str(&format!(". DOI: {doi}"));
            }
            citation
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// ABNT-style entries of the high-relevance references.
///
/// The lead author's surname is upper-cased; further authors collapse into `et al.`.
pub fn abnt_list() -> String {
    by_relevance(Relevance::High)
        .map(|reference| {
            let mut parts = reference.authors.splitn(3, ", ");
            let surname = parts.next().unwrap_or_default().to_uppercase();
            let initials = parts.next().unwrap_or_default();
            let lead = match parts.next() {
                Some(_) => format!("{surname}, {initials} et al."),
                None => format!("{surname}, {initials}"),
            };

            let mut citation = format!("{lead} {}. {}, ", reference.title, reference.journal);
            if let Some(volume) = reference.volume {
                citation.push_str(&format!("v. {volume}, "));
            }
            citation.push_str(&reference.year.to_string());
            if let Some(pages) = reference.pages {
                citation.push_str(&format!(", p. {pages}"));
            }
            if let Some(doi) = reference.doi {
                citation.push_str(&format!(". DOI: {doi}"));
            }
            citation
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn by_relevance(relevance: Relevance) -> impl Iterator<Item = &'static Reference> {
    CATALOG
        .iter()
        .filter(move |reference| reference.relevance == relevance)
}

pub fn by_kind(kind: PublicationKind) -> impl Iterator<Item = &'static Reference> {
    CATALOG.iter().filter(move |reference| reference.kind == kind)
}

/// Case-insensitive match on title, authors, description or journal.
pub fn search(keyword: &str) -> Vec<&'static Reference> {
    let term = keyword.to_lowercase();
    CATALOG
        .iter()
        .filter(|reference| {
            [
                reference.title,
                reference.authors,
                reference.description,
                reference.journal,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStatistics {
    pub total: usize,
    pub by_relevance: BTreeMap<Relevance, usize>,
    pub by_kind: BTreeMap<PublicationKind, usize>,
    pub first_year: u16,
    pub last_year: u16,
    pub with_doi: usize,
}

pub fn statistics() -> CatalogStatistics {
    let mut by_relevance = BTreeMap::new();
    let mut by_kind = BTreeMap::new();
    for reference in CATALOG.iter() {
        *by_relevance.entry(reference.relevance).or_insert(0) += 1;
        *by_kind.entry(reference.kind).or_insert(0) += 1;
    }

    CatalogStatistics {
        total: CATALOG.len(),
        by_relevance,
        by_kind,
        first_year: CATALOG.iter().map(|r| r.year).min().unwrap_or_default(),
        last_year: CATALOG.iter().map(|r| r.year).max().unwrap_or_default(),
        with_doi: CATALOG.iter().filter(|r| r.doi.is_some()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citation_list_numbers_high_relevance_entries() {
        let list = citation_list();
        let lines: Vec<&str> = list.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("1. Rudnicka, L., Olszewska, M."));
        assert!(lines[0].ends_with("Dermatologic Clinics, 26, 23-34. DOI: 10.1016/j.det.2007.10.002"));
        assert!(lines.iter().any(|line| line.ends_with("Journal of Drugs in Dermatology, 17, S1-S8")));
    }

    #[test]
    fn abnt_entries_lead_with_upper_case_surname() {
        let list = abnt_list();
        let first = list.lines().next().expect("at least one entry");
        assert!(first.starts_with("RUDNICKA, L. et al. Hair shafts in trichoscopy"));
        assert!(first.contains("Dermatologic Clinics, v. 26, 2008, p. 23-34"));
    }

    #[test]
    fn filters_and_search() {
        assert_eq!(by_relevance(Relevance::Medium).count(), 2);
        assert_eq!(by_kind(PublicationKind::Chapter).count(), 1);
        assert_eq!(by_kind(PublicationKind::Book).count(), 0);

        let ids: Vec<&str> = search("ALOPECIA").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["rakowska-2009", "kumar-2019"]);
        assert!(search("no such keyword").is_empty());
    }

    #[test]
    fn statistics_cover_the_catalog() {
        let stats = statistics();
        assert_eq!(stats.total, 8);
        assert_eq!(stats.by_relevance.get(&Relevance::High), Some(&6));
        assert_eq!(stats.by_kind.get(&PublicationKind::Article), Some(&6));
        assert_eq!((stats.first_year, stats.last_year), (2008, 2019));
        assert_eq!(stats.with_doi, 7);
    }
}
