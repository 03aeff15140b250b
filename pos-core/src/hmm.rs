//! # Treinamento do HMM Bigrama
//!
//! Treinamento supervisionado clássico de um Hidden Markov Model onde:
//! - **Estados Ocultos**: tags morfossintáticas (N, V, ART, etc.)
//! - **Observações**: tokens (palavras em minúsculas)
//!
//! O treinador estima por máxima verossimilhança:
//! 1. Probabilidade de Transição: $P(tag_i \mid tag_{i-1})$, incluindo a
//!    transição a partir do sentinela [`START_TAG`] (distribuição de tags
//!    iniciais de sentença).
//! 2. Probabilidade de Emissão: $P(palavra \mid tag)$.
//!
//! ## Processo de Treinamento
//!
//! 1. **Contagem**: uma única passada esquerda→direita por cada par
//!    (tokens, tags) acumulando contagens brutas inteiras — nunca
//!    probabilidades intermediárias.
//! 2. **Normalização**: passada final independente por linha:
//!    `ln(contagem / total_da_linha)`. Log natural, para compatibilidade com
//!    bibliotecas numéricas.
//!
//! Não há smoothing: o treinador jamais fabrica entradas de contagem zero.
//! Palavras fora do vocabulário são tratadas apenas na decodificação, via
//! penalidade fixa (veja [`crate::viterbi`]).

use std::collections::HashMap;

use crate::error::TrainingError;
use crate::model::{EmissionTable, HmmModel, TransitionTable, START_TAG};

/// Mapa de contagens brutas: chave externa → chave interna → ocorrências.
type CountRows = HashMap<String, HashMap<String, u32>>;

/// Acumulador de contagens do HMM.
///
/// Mantém apenas contagens inteiras durante todo o treinamento; a conversão
/// para log-probabilidades acontece uma única vez em [`into_model`], que
/// consome o acumulador e produz um [`HmmModel`] imutável.
///
/// [`into_model`]: HmmTrainer::into_model
#[derive(Debug, Default)]
pub struct HmmTrainer {
    transition_counts: CountRows,
    emission_counts: CountRows,
}

impl HmmTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treina um modelo a partir de linhas paralelas já tokenizadas.
    ///
    /// `sentences[i]` e `tag_lines[i]` devem ter a mesma quantidade de
    /// tokens; linhas em branco (vetores vazios) dos dois lados são puladas.
    /// Linhas de tags excedentes ao final são ignoradas, mas uma sentença
    /// não-vazia sem linha de tags é [`TrainingError::MissingTagLine`].
    pub fn train(
        sentences: &[Vec<String>],
        tag_lines: &[Vec<String>],
    ) -> Result<HmmModel, TrainingError> {
        if sentences.len() > tag_lines.len() {
            let surplus = &sentences[tag_lines.len()..];
            if let Some(offset) = surplus.iter().position(|line| !line.is_empty()) {
                return Err(TrainingError::MissingTagLine {
                    line: tag_lines.len() + offset + 1,
                });
            }
        }

        let mut trainer = HmmTrainer::new();
        for (index, (tokens, tags)) in sentences.iter().zip(tag_lines).enumerate() {
            trainer.observe(tokens, tags, index + 1)?;
        }
        Ok(trainer.into_model())
    }

    /// Acumula as contagens de um par (tokens, tags) alinhado.
    ///
    /// `line` é o número de linha (1-based) citado nas mensagens de erro.
    /// Um par totalmente vazio é pulado sem erro nem contagem.
    pub fn observe(
        &mut self,
        tokens: &[String],
        tags: &[String],
        line: usize,
    ) -> Result<(), TrainingError> {
        if tokens.is_empty() && tags.is_empty() {
            return Ok(());
        }
        if tokens.len() != tags.len() {
            return Err(TrainingError::LengthMismatch {
                line,
                tokens: tokens.len(),
                tags: tags.len(),
            });
        }

        // Transição sentinela: captura a distribuição da primeira tag
        bump(&mut self.transition_counts, START_TAG, &tags[0]);

        for i in 0..tags.len() - 1 {
            bump(&mut self.transition_counts, &tags[i], &tags[i + 1]);
        }

        // A última palavra conta como emissão mesmo sem transição de saída
        for (token, tag) in tokens.iter().zip(tags) {
            bump(&mut self.emission_counts, tag, &token.to_lowercase());
        }

        Ok(())
    }

    /// Converte as contagens acumuladas nas duas tabelas de
    /// log-probabilidades. Passada pura: nenhuma contagem é alterada antes de
    /// todas terem sido acumuladas.
    pub fn into_model(self) -> HmmModel {
        HmmModel {
            transitions: TransitionTable::from_rows(normalize(self.transition_counts)),
            emissions: EmissionTable::from_rows(normalize(self.emission_counts)),
        }
    }
}

fn bump(rows: &mut CountRows, outer: &str, inner: &str) {
    *rows
        .entry(outer.to_string())
        .or_default()
        .entry(inner.to_string())
        .or_insert(0) += 1;
}

/// Normaliza cada linha de contagens independentemente: `ln(c / total)`.
///
/// Toda linha existente tem total > 0 (linhas só nascem na primeira
/// contagem), então a divisão e o logaritmo são sempre bem definidos.
fn normalize(counts: CountRows) -> HashMap<String, HashMap<String, f64>> {
    counts
        .into_iter()
        .map(|(outer, row)| {
            let total = f64::from(row.values().sum::<u32>());
            let normalized = row
                .into_iter()
                .map(|(inner, count)| (inner, (f64::from(count) / total).ln()))
                .collect();
            (outer, normalized)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn corpus(pairs: &[(&str, &str)]) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
        let sentences = pairs.iter().map(|(s, _)| toks(s)).collect();
        let tags = pairs.iter().map(|(_, t)| toks(t)).collect();
        (sentences, tags)
    }

    #[test]
    fn test_rows_are_valid_distributions() {
        let (sentences, tags) = corpus(&[
            ("time flies", "NOUN VERB"),
            ("fruit flies", "NOUN VERB"),
            ("flies bite", "NOUN VERB"),
        ]);
        let model = HmmTrainer::train(&sentences, &tags).unwrap();

        for (_, row) in model.transitions.rows() {
            let sum: f64 = row.values().map(|p| p.exp()).sum();
            assert!((sum - 1.0).abs() < 1e-9, "linha de transição soma {sum}");
        }
        for (_, row) in model.emissions.rows() {
            let sum: f64 = row.values().map(|p| p.exp()).sum();
            assert!((sum - 1.0).abs() < 1e-9, "linha de emissão soma {sum}");
        }
    }

    #[test]
    fn test_start_transition_captures_first_tag() {
        let (sentences, tags) = corpus(&[("time flies", "NOUN VERB")]);
        let model = HmmTrainer::train(&sentences, &tags).unwrap();

        // Única sentença começa com NOUN: P(NOUN | #) = 1
        assert_eq!(model.transitions.score(START_TAG, "NOUN"), Some(0.0));
        assert_eq!(model.transitions.score(START_TAG, "VERB"), None);
    }

    #[test]
    fn test_final_word_emission_is_counted() {
        let (sentences, tags) = corpus(&[("time flies", "NOUN VERB")]);
        let model = HmmTrainer::train(&sentences, &tags).unwrap();

        // "flies" é a última palavra: precisa aparecer como emissão de VERB
        assert_eq!(model.emissions.score("VERB", "flies"), Some(0.0));
        // VERB encerra a sentença: nenhuma transição de saída
        assert!(model.transitions.successors("VERB").is_none());
    }

    #[test]
    fn test_emission_words_are_case_folded() {
        let (sentences, tags) = corpus(&[("Time Flies", "NOUN VERB")]);
        let model = HmmTrainer::train(&sentences, &tags).unwrap();

        assert!(model.emissions.score("NOUN", "time").is_some());
        assert!(model.emissions.score("NOUN", "Time").is_none());
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let (sentences, tags) = corpus(&[("time flies fast", "NOUN VERB")]);
        let err = HmmTrainer::train(&sentences, &tags).unwrap_err();
        assert_eq!(
            err,
            TrainingError::LengthMismatch {
                line: 1,
                tokens: 3,
                tags: 2
            }
        );
    }

    #[test]
    fn test_missing_tag_line_is_an_error() {
        let sentences = vec![toks("time flies"), toks("fruit flies")];
        let tags = vec![toks("NOUN VERB")];
        let err = HmmTrainer::train(&sentences, &tags).unwrap_err();
        assert_eq!(err, TrainingError::MissingTagLine { line: 2 });
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let with_blanks = HmmTrainer::train(
            &[toks("time flies"), vec![], toks("fruit flies")],
            &[toks("NOUN VERB"), vec![], toks("NOUN VERB")],
        )
        .unwrap();
        let without = HmmTrainer::train(
            &[toks("time flies"), toks("fruit flies")],
            &[toks("NOUN VERB"), toks("NOUN VERB")],
        )
        .unwrap();

        assert_eq!(with_blanks, without);
    }

    #[test]
    fn test_trailing_blank_sentences_do_not_require_tags() {
        let model = HmmTrainer::train(
            &[toks("time flies"), vec![]],
            &[toks("NOUN VERB")],
        );
        assert!(model.is_ok());
    }

    #[test]
    fn test_counts_accumulate_across_sentences() {
        let (sentences, tags) = corpus(&[
            ("a b", "X Y"),
            ("a c", "X Y"),
        ]);
        let model = HmmTrainer::train(&sentences, &tags).unwrap();

        // X emitiu "a" duas vezes em duas ocorrências: P(a|X) = 1
        assert_eq!(model.emissions.score("X", "a"), Some(0.0));
        // Y emitiu "b" e "c" uma vez cada: P(b|Y) = 1/2
        let p_b = model.emissions.score("Y", "b").unwrap();
        assert!((p_b - (0.5f64).ln()).abs() < 1e-12);
    }
}
