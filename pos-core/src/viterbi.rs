//! # Algoritmo de Viterbi — Decodificação Esparsa do HMM
//!
//! Programação dinâmica que encontra a sequência de tags de maior score para
//! uma sentença, dado o modelo treinado.
//!
//! ## Intuição
//!
//! Uma busca exaustiva testaria `O(T^N)` sequências para N tokens e T tags.
//! O Viterbi explora que a **melhor sequência até o token i terminando na tag
//! t** depende apenas da **melhor sequência até o token i-1** → `O(N × T²)`.
//!
//! ## Variante esparsa
//!
//! Diferente da formulação clássica com matriz densa `N × T`, aqui o conjunto
//! de estados por posição é **dinâmico**: só entram tags alcançáveis por uma
//! transição observada a partir de uma tag já alcançável. Na posição 0 o
//! conjunto é exatamente o dos sucessores do sentinela `#`. Uma tag sem
//! transições de saída é um beco sem saída: encolhe o conjunto, não é erro.
//!
//! ## Algoritmo
//!
//! ```text
//! score[#] = 0
//! Para cada palavra w:
//!     cand(n) = max_s [ score[s] + transição(s, n) ] + emissão(n, w)
//!     onde emissão(n, w) = -penalidade se (n, w) nunca foi observado
//! Terminação: melhor tag do último passo; caminho via backpointers, invertido
//! ```
//!
//! Todos os scores são somas de logaritmos naturais — negativos e
//! monotonicamente decrescentes com o comprimento da sentença. Nada é
//! exponenciado de volta durante a decodificação, evitando underflow em
//! sentenças longas.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DecodingError;
use crate::model::{HmmModel, START_TAG};

/// Penalidade padrão (em log-space) para palavra nunca vista sob a tag
/// candidata. Hiperparâmetro do modelo, não um valor aprendido: valores
/// maiores desencorajam mais caminhos apoiados em palavras desconhecidas,
/// mas nunca os proíbem.
pub const DEFAULT_UNSEEN_PENALTY: f64 = 100.0;

/// Resultado da decodificação de uma sentença.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViterbiResult {
    /// Sequência de tags de maior score, uma por token de entrada.
    /// O sentinela `#` nunca aparece aqui.
    pub tags: Vec<String>,
    /// Score acumulado (soma de log-probabilidades e penalidades) do
    /// caminho escolhido. Zero para a sentença vazia.
    pub score: f64,
}

/// Executa o Viterbi esparso sobre uma sentença tokenizada.
///
/// # Erros
///
/// - [`DecodingError::UntrainedModel`]: não existe transição alguma a partir
///   do sentinela `#` (modelo vazio/degenerado).
/// - [`DecodingError::NoReachableState`]: todos os estados alcançáveis eram
///   becos sem saída antes do fim da sentença.
///
/// Uma sentença vazia retorna `Ok` com zero tags. Palavras desconhecidas
/// nunca são erro: recebem `-unseen_penalty` no lugar do score de emissão.
pub fn viterbi_decode(
    model: &HmmModel,
    tokens: &[String],
    unseen_penalty: f64,
) -> Result<ViterbiResult, DecodingError> {
    if tokens.is_empty() {
        return Ok(ViterbiResult {
            tags: Vec::new(),
            score: 0.0,
        });
    }
    if !model.is_trained() {
        return Err(DecodingError::UntrainedModel);
    }

    // Scores acumulados dos estados alcançáveis no passo atual
    let mut scores: HashMap<String, f64> = HashMap::from([(START_TAG.to_string(), 0.0)]);
    // backtrack[t]: tag vencedora no passo t → tag de origem no passo t-1
    let mut backtrack: Vec<HashMap<String, String>> = Vec::with_capacity(tokens.len());

    for (position, word) in tokens.iter().enumerate() {
        // Case-folding também na consulta, como no treinamento
        let word = word.to_lowercase();

        let mut next_scores: HashMap<String, f64> = HashMap::new();
        let mut previous: HashMap<String, String> = HashMap::new();

        for (state, &accumulated) in &scores {
            let Some(successors) = model.transitions.successors(state) else {
                // Beco sem saída: nenhum candidato a partir deste estado
                continue;
            };
            for (next_state, &transition) in successors {
                let emission = model
                    .emissions
                    .score(next_state, &word)
                    .unwrap_or(-unseen_penalty);
                let candidate = accumulated + transition + emission;

                // `>` estrito: em empate, a primeira origem encontrada vence
                // (determinístico para um mesmo par de tabelas)
                if next_scores
                    .get(next_state)
                    .map_or(true, |&best| candidate > best)
                {
                    next_scores.insert(next_state.clone(), candidate);
                    previous.insert(next_state.clone(), state.clone());
                }
            }
        }

        if next_scores.is_empty() {
            return Err(DecodingError::NoReachableState { position });
        }

        scores = next_scores;
        backtrack.push(previous);
    }

    // Terminação: melhor estado do último passo (empate → primeiro visto)
    let (best_tag, best_score) = best_state(&scores);

    // Reconstrução: segue os backpointers do último passo até o primeiro e
    // inverte. O predecessor registrado no passo 0 é o sentinela, que não
    // entra no caminho.
    let mut path = Vec::with_capacity(tokens.len());
    path.push(best_tag.clone());
    let mut current = best_tag;
    for step in backtrack[1..].iter().rev() {
        let prev = step
            .get(&current)
            .expect("backpointer registrado junto com o score")
            .clone();
        path.push(prev.clone());
        current = prev;
    }
    path.reverse();

    Ok(ViterbiResult {
        tags: path,
        score: best_score,
    })
}

/// (tag, score) de maior score; `>` estrito preserva a primeira em empates.
fn best_state(scores: &HashMap<String, f64>) -> (String, f64) {
    let mut best: Option<(&String, f64)> = None;
    for (tag, &score) in scores {
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((tag, score));
        }
    }
    let (tag, score) = best.expect("conjunto alcançável nunca é vazio aqui");
    (tag.clone(), score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::HmmTrainer;

    fn toks(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    /// Modelo mínimo de duas tags: "time flies" e "fruit flies",
    /// ambas NOUN VERB.
    fn time_flies_model() -> HmmModel {
        HmmTrainer::train(
            &[toks("time flies"), toks("fruit flies")],
            &[toks("NOUN VERB"), toks("NOUN VERB")],
        )
        .unwrap()
    }

    #[test]
    fn test_decodes_training_sentence() {
        let model = time_flies_model();
        let result = viterbi_decode(&model, &toks("time flies"), DEFAULT_UNSEEN_PENALTY).unwrap();
        assert_eq!(result.tags, vec!["NOUN", "VERB"]);
    }

    #[test]
    fn test_unseen_bigram_degrades_gracefully() {
        let model = time_flies_model();
        // NOUN→NOUN nunca foi observado: o decodificador segue para a única
        // tag alcançável (VERB) pagando a penalidade por "time" sob VERB,
        // em vez de falhar.
        let result = viterbi_decode(&model, &toks("fruit time"), DEFAULT_UNSEEN_PENALTY).unwrap();
        assert_eq!(result.tags, vec!["NOUN", "VERB"]);
    }

    #[test]
    fn test_empty_sentence_decodes_to_empty() {
        let model = time_flies_model();
        let result = viterbi_decode(&model, &[], DEFAULT_UNSEEN_PENALTY).unwrap();
        assert!(result.tags.is_empty());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_untrained_model_is_an_error() {
        let model = HmmModel::default();
        let err = viterbi_decode(&model, &toks("time"), DEFAULT_UNSEEN_PENALTY).unwrap_err();
        assert_eq!(err, DecodingError::UntrainedModel);
    }

    #[test]
    fn test_all_unseen_words_still_decode() {
        let model = time_flies_model();
        let result =
            viterbi_decode(&model, &toks("xyzzy plugh"), DEFAULT_UNSEEN_PENALTY).unwrap();
        // Comprimento preservado mesmo com vocabulário 100% desconhecido
        assert_eq!(result.tags.len(), 2);
    }

    #[test]
    fn test_output_length_matches_input() {
        // O ciclo V ↔ CONJ garante estados alcançáveis em qualquer posição
        let model = HmmTrainer::train(
            &[toks("o gato dorme"), toks("gato corre e dorme")],
            &[toks("ART N V"), toks("N V CONJ V")],
        )
        .unwrap();

        for sentence in ["o", "o gato", "o gato dorme", "gato gato gato gato"] {
            let tokens = toks(sentence);
            let result = viterbi_decode(&model, &tokens, DEFAULT_UNSEEN_PENALTY).unwrap();
            assert_eq!(result.tags.len(), tokens.len());
        }
    }

    #[test]
    fn test_decode_is_deterministic() {
        let model = time_flies_model();
        let tokens = toks("fruit flies");
        let first = viterbi_decode(&model, &tokens, DEFAULT_UNSEEN_PENALTY).unwrap();
        let second = viterbi_decode(&model, &tokens, DEFAULT_UNSEEN_PENALTY).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_token_takes_best_joint_probability() {
        // "banco" aparece 2x como N e 1x como V em sentenças de um token:
        // P(N|#)·P(banco|N) = (2/3)·1 > P(V|#)·P(banco|V) = (1/3)·1
        let model = HmmTrainer::train(
            &[toks("banco"), toks("banco"), toks("banco")],
            &[toks("N"), toks("N"), toks("V")],
        )
        .unwrap();

        let result = viterbi_decode(&model, &toks("banco"), DEFAULT_UNSEEN_PENALTY).unwrap();
        assert_eq!(result.tags, vec!["N"]);
    }

    #[test]
    fn test_raising_penalty_never_favors_unseen_paths() {
        let model = time_flies_model();
        // "time" nunca foi visto sob VERB: o caminho paga a penalidade
        let tokens = toks("fruit time");

        let mild = viterbi_decode(&model, &tokens, 10.0).unwrap();
        let harsh = viterbi_decode(&model, &tokens, 1000.0).unwrap();

        assert_eq!(mild.tags, harsh.tags);
        assert!(harsh.score < mild.score);
    }

    #[test]
    fn test_exhausted_reachable_set_is_an_error() {
        // Corpus de uma sentença de um token: a única tag (X) não tem
        // transição de saída, então a segunda palavra não tem estado possível
        let model = HmmTrainer::train(&[toks("a")], &[toks("X")]).unwrap();
        let err = viterbi_decode(&model, &toks("a b"), DEFAULT_UNSEEN_PENALTY).unwrap_err();
        assert_eq!(err, DecodingError::NoReachableState { position: 1 });
    }

    #[test]
    fn test_decode_case_folds_the_query() {
        let model = time_flies_model();
        let result = viterbi_decode(&model, &toks("TIME Flies"), DEFAULT_UNSEEN_PENALTY).unwrap();
        assert_eq!(result.tags, vec!["NOUN", "VERB"]);
    }
}
