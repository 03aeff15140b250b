//! # Avaliação do Etiquetador
//!
//! Compara a saída do decodificador com as tags-ouro posição a posição e
//! acumula um [`EvalReport`] com acertos, erros e posições sem par.
//!
//! A avaliação em lote ([`evaluate_corpus`]) decodifica as sentenças de teste
//! em paralelo com rayon: as tabelas do modelo são somente-leitura após o
//! treinamento, então cada sentença é independente das demais e nenhum lock é
//! necessário.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::DecodingError;
use crate::model::HmmModel;
use crate::viterbi::viterbi_decode;

/// Totais de uma avaliação: acertos, erros e posições sem par.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Posições em que a tag prevista coincide com a tag-ouro.
    pub correct: usize,
    /// Posições comparadas em que as tags divergem.
    pub incorrect: usize,
    /// Posições excedentes de um dos lados (sequências de comprimentos
    /// diferentes). Reportado, nunca fatal.
    pub unmatched: usize,
}

impl EvalReport {
    /// Total de posições efetivamente comparadas.
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Fração de acertos sobre as posições comparadas (0.0 quando nada
    /// foi comparado).
    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.correct as f64 / self.total() as f64
        }
    }

    /// Acumula os totais de outro relatório neste.
    pub fn merge(&mut self, other: &EvalReport) {
        self.correct += other.correct;
        self.incorrect += other.incorrect;
        self.unmatched += other.unmatched;
    }
}

/// Compara duas sequências de tags posição a posição, até o comprimento da
/// mais curta; o excedente vira `unmatched`.
pub fn evaluate(predicted: &[String], gold: &[String]) -> EvalReport {
    let compared = predicted.len().min(gold.len());
    let correct = predicted
        .iter()
        .zip(gold)
        .filter(|(p, g)| p == g)
        .count();

    EvalReport {
        correct,
        incorrect: compared - correct,
        unmatched: predicted.len().abs_diff(gold.len()),
    }
}

/// Decodifica cada sentença de teste e acumula um único relatório.
///
/// Sentenças são processadas em paralelo (rayon) sobre as tabelas imutáveis.
/// Linhas excedentes de um dos arquivos entram como `unmatched` (contagem de
/// tokens), espelhando o contrato posição-a-posição de [`evaluate`]. O
/// primeiro [`DecodingError`] interrompe a avaliação.
pub fn evaluate_corpus(
    model: &HmmModel,
    sentences: &[Vec<String>],
    gold: &[Vec<String>],
    unseen_penalty: f64,
) -> Result<EvalReport, DecodingError> {
    let compared = sentences.len().min(gold.len());

    let mut report = sentences[..compared]
        .par_iter()
        .zip(gold[..compared].par_iter())
        .map(|(tokens, gold_tags)| -> Result<EvalReport, DecodingError> {
            let result = viterbi_decode(model, tokens, unseen_penalty)?;
            Ok(evaluate(&result.tags, gold_tags))
        })
        .try_reduce(EvalReport::default, |mut acc, partial| {
            acc.merge(&partial);
            Ok(acc)
        })?;

    let surplus: usize = sentences[compared..].iter().map(Vec::len).sum::<usize>()
        + gold[compared..].iter().map(Vec::len).sum::<usize>();
    report.unmatched += surplus;

    Ok(report)
}
