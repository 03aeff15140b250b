//! # Tabelas do Modelo HMM
//!
//! O modelo treinado é composto por duas tabelas imutáveis de
//! log-probabilidades naturais:
//!
//! - [`TransitionTable`]: $P(tag_i \mid tag_{i-1})$ — chave externa: tag de
//!   origem (incluindo o estado inicial [`START_TAG`]), chave interna: tag de
//!   destino.
//! - [`EmissionTable`]: $P(palavra \mid tag)$ — chave externa: tag, chave
//!   interna: palavra (já normalizada em minúsculas).
//!
//! ## Esparsidade
//!
//! As tabelas só contêm eventos **observados** no treinamento. A ausência de
//! uma entrada significa "nunca visto", nunca "probabilidade zero implícita":
//! toda consulta retorna `Option<f64>` e quem decide o que fazer com `None` é
//! o decodificador (penalidade de não-observação) — jamais um `unwrap`.
//!
//! ## Invariante de normalização
//!
//! Para toda linha presente, os valores vieram de `ln(contagem / total)` da
//! mesma linha, logo $\sum_n \exp(v_n) \approx 1$ — cada linha é uma
//! distribuição categórica válida em log-space.
//!
//! ## Compartilhamento
//!
//! Depois do treinamento as tabelas nunca mudam. Decodificar uma sentença não
//! toca em estado mutável, então um mesmo [`HmmModel`] pode ser lido por
//! várias threads ao mesmo tempo sem lock (é o que faz
//! [`crate::evaluation::evaluate_corpus`] com rayon).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DecodingError;
use crate::viterbi::{viterbi_decode, ViterbiResult, DEFAULT_UNSEEN_PENALTY};

/// Tag sentinela que representa o estado "antes da primeira palavra".
///
/// Toda sentença de treinamento contribui com uma transição `# → primeira_tag`,
/// capturando a distribuição de tags iniciais. O sentinela nunca aparece na
/// saída do decodificador.
pub const START_TAG: &str = "#";

/// Tabela de transição: tag de origem → tag de destino → log-probabilidade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionTable {
    rows: HashMap<String, HashMap<String, f64>>,
}

impl TransitionTable {
    pub(crate) fn from_rows(rows: HashMap<String, HashMap<String, f64>>) -> Self {
        Self { rows }
    }

    /// Log-probabilidade da transição `from → to`, se observada no treino.
    pub fn score(&self, from: &str, to: &str) -> Option<f64> {
        self.rows.get(from)?.get(to).copied()
    }

    /// Linha esparsa de sucessores de `from`.
    ///
    /// `None` significa que `from` nunca foi origem de transição alguma —
    /// no Viterbi isso é um beco sem saída, não um erro.
    pub fn successors(&self, from: &str) -> Option<&HashMap<String, f64>> {
        self.rows.get(from)
    }

    /// Itera sobre todas as linhas (origem, sucessores).
    pub fn rows(&self) -> impl Iterator<Item = (&String, &HashMap<String, f64>)> {
        self.rows.iter()
    }

    /// Quantidade de tags que aparecem como origem (incluindo `#`).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Tabela de emissão: tag → palavra → log-probabilidade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionTable {
    rows: HashMap<String, HashMap<String, f64>>,
}

impl EmissionTable {
    pub(crate) fn from_rows(rows: HashMap<String, HashMap<String, f64>>) -> Self {
        Self { rows }
    }

    /// Log-probabilidade de `tag` emitir `word`, se o par foi observado.
    ///
    /// `None` = palavra nunca vista com esta tag → o decodificador aplica a
    /// penalidade de não-observação no lugar.
    pub fn score(&self, tag: &str, word: &str) -> Option<f64> {
        self.rows.get(tag)?.get(word).copied()
    }

    /// Linha esparsa de palavras emitidas por `tag`.
    pub fn row(&self, tag: &str) -> Option<&HashMap<String, f64>> {
        self.rows.get(tag)
    }

    /// Itera sobre todas as linhas (tag, palavras).
    pub fn rows(&self) -> impl Iterator<Item = (&String, &HashMap<String, f64>)> {
        self.rows.iter()
    }
}

/// O modelo HMM completo: o par de tabelas produzido pelo treinamento.
///
/// Construído uma única vez por [`crate::hmm::HmmTrainer`], imutável daí em
/// diante. O decodificador ([`crate::viterbi`]) só **empresta** as tabelas —
/// não existe estado global nem retreinamento incremental.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HmmModel {
    /// $P(tag_i \mid tag_{i-1})$ em log-space.
    pub transitions: TransitionTable,
    /// $P(palavra \mid tag)$ em log-space.
    pub emissions: EmissionTable,
}

impl HmmModel {
    /// Um modelo é utilizável se existe ao menos uma transição a partir do
    /// estado inicial; sem isso o Viterbi não tem por onde começar.
    pub fn is_trained(&self) -> bool {
        self.transitions
            .successors(START_TAG)
            .is_some_and(|row| !row.is_empty())
    }

    /// Decodifica uma sentença com a penalidade padrão de não-observação.
    ///
    /// Conveniência sobre [`viterbi_decode`]; retorna uma tag por token.
    pub fn decode(&self, tokens: &[String]) -> Result<Vec<String>, DecodingError> {
        self.decode_with_penalty(tokens, DEFAULT_UNSEEN_PENALTY)
            .map(|result| result.tags)
    }

    /// Decodifica com penalidade explícita, expondo também o score final.
    pub fn decode_with_penalty(
        &self,
        tokens: &[String],
        unseen_penalty: f64,
    ) -> Result<ViterbiResult, DecodingError> {
        viterbi_decode(self, tokens, unseen_penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_table() -> TransitionTable {
        let mut rows = HashMap::new();
        let mut start = HashMap::new();
        start.insert("NOUN".to_string(), 0.0);
        rows.insert(START_TAG.to_string(), start);
        TransitionTable::from_rows(rows)
    }

    #[test]
    fn test_absent_entry_is_none_not_zero() {
        let table = tiny_table();
        assert_eq!(table.score(START_TAG, "NOUN"), Some(0.0));
        assert_eq!(table.score(START_TAG, "VERB"), None);
        assert_eq!(table.score("NOUN", "VERB"), None);
        assert!(table.successors("NOUN").is_none());
    }

    #[test]
    fn test_is_trained_requires_start_row() {
        let empty = HmmModel::default();
        assert!(!empty.is_trained());

        let model = HmmModel {
            transitions: tiny_table(),
            emissions: EmissionTable::default(),
        };
        assert!(model.is_trained());
    }
}
