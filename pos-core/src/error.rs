//! # Erros do Etiquetador
//!
//! Erros estruturados para as duas fases do sistema:
//!
//! - **Treinamento** ([`TrainingError`]): corpus desalinhado (sentença e tags
//!   com contagens diferentes, ou arquivo de tags mais curto).
//! - **Decodificação** ([`DecodingError`]): modelo degenerado ou sentença que
//!   esgota o conjunto de estados alcançáveis.
//!
//! Palavras desconhecidas **não** são erro: são tratadas pela penalidade de
//! não-observação durante a decodificação (veja [`crate::viterbi`]).
//! Todos os erros se propagam ao chamador imediato com `?`.

use thiserror::Error;

/// Erros de dados de treinamento.
///
/// O treinamento nunca recupera parcialmente: o primeiro par de linhas
/// inconsistente interrompe tudo e chega ao chamador com o número da linha
/// (1-based) para facilitar a correção do corpus.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainingError {
    /// Uma linha de sentença e sua linha de tags têm quantidades
    /// diferentes de tokens.
    #[error("linha {line}: sentença com {tokens} tokens, mas {tags} tags")]
    LengthMismatch {
        /// Número da linha no corpus (1-based).
        line: usize,
        /// Tokens na linha de sentença.
        tokens: usize,
        /// Tokens na linha de tags.
        tags: usize,
    },

    /// O arquivo de tags terminou antes do arquivo de sentenças.
    #[error("linha {line}: sentença sem linha de tags correspondente")]
    MissingTagLine {
        /// Número da primeira linha de sentença sem par (1-based).
        line: usize,
    },
}

/// Erros do decodificador Viterbi.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodingError {
    /// Nenhuma transição foi observada a partir do estado inicial `#`.
    /// O modelo está vazio ou nunca foi treinado; retreine ou aborte.
    #[error("modelo não treinado: nenhuma transição a partir do estado inicial")]
    UntrainedModel,

    /// Todos os estados alcançáveis eram becos sem saída antes do fim da
    /// sentença (só acontece com corpora minúsculos; veja a decisão em
    /// DESIGN.md).
    #[error("nenhum estado alcançável na posição {position} da sentença")]
    NoReachableState {
        /// Índice (0-based) do token onde o conjunto alcançável esvaziou.
        position: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = TrainingError::LengthMismatch {
            line: 7,
            tokens: 5,
            tags: 4,
        };
        assert_eq!(err.to_string(), "linha 7: sentença com 5 tokens, mas 4 tags");

        let err = DecodingError::UntrainedModel;
        assert!(err.to_string().contains("não treinado"));
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TrainingError>();
        assert_send_sync::<DecodingError>();
    }
}
