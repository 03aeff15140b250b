//! # Tokenizador
//!
//! Normalização de texto para o etiquetador. O case-folding é obrigatório nas
//! duas fases — treino e consulta — porque maiúsculas divergentes são a
//! principal fonte de falsos "nunca vistos".
//!
//! Duas rotinas, para as duas origens de texto:
//!
//! - [`tokenize`]: texto livre (REPL, linha de comando) — minúsculas, remove
//!   pontuação de sentença e divide por espaços.
//! - [`fold_line`]: linha de corpus já tokenizada por espaços — só minúsculas
//!   e divisão, preservando o alinhamento 1:1 com a linha de tags (a
//!   pontuação do corpus tem tag própria e não pode sumir).

use std::sync::OnceLock;

use regex::Regex;

static PUNCTUATION: OnceLock<Regex> = OnceLock::new();

fn punctuation() -> &'static Regex {
    // Pontuação de sentença descartada no texto livre
    PUNCTUATION.get_or_init(|| Regex::new(r"[.,!?;:]+").expect("padrão fixo"))
}

/// Tokeniza texto livre: minúsculas, sem pontuação de sentença, dividido por
/// espaços em branco. Uma linha vazia (ou só de pontuação) vira zero tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    let folded = line.to_lowercase();
    let stripped = punctuation().replace_all(&folded, "");
    stripped.split_whitespace().map(String::from).collect()
}

/// Divide uma linha de corpus em tokens minúsculos, sem remover nada.
pub fn fold_line(line: &str) -> Vec<String> {
    line.to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// Divide uma linha de tags. Tags não sofrem case-folding: `N` e `n` seriam
/// tags distintas se o corpus as distinguir.
pub fn split_tags(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_strips_punctuation() {
        assert_eq!(
            tokenize("O Gato dorme, muito."),
            vec!["o", "gato", "dorme", "muito"]
        );
    }

    #[test]
    fn test_tokenize_drops_standalone_punctuation() {
        // O "." isolado não pode virar token vazio
        assert_eq!(tokenize("ele chegou ."), vec!["ele", "chegou"]);
        assert!(tokenize("...").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_fold_line_preserves_every_token() {
        // Pontuação do corpus fica: a linha de tags dela depende
        assert_eq!(
            fold_line("O gato dorme ."),
            vec!["o", "gato", "dorme", "."]
        );
    }

    #[test]
    fn test_split_tags_keeps_case() {
        assert_eq!(split_tags("ART N V PONT"), vec!["ART", "N", "V", "PONT"]);
    }
}
