//! # Corpus Paralelo em Português Brasileiro
//!
//! O formato de corpus é o par de arquivos paralelos herdado da tradição de
//! POS tagging: um arquivo de sentenças e um de tags, ambos UTF-8, uma
//! sentença por linha, tokens separados por espaço, e a linha *i* de um
//! correspondendo à linha *i* do outro.
//!
//! Este módulo é a cola de E/S em volta do núcleo: lê e tokeniza os pares de
//! arquivos ([`load_parallel_files`]) e embute um corpus de demonstração
//! anotado à mão ([`demo_corpus`]) para o sistema funcionar sem arquivos
//! externos — útil no REPL e nos testes.
//!
//! ## Tagset do corpus de demonstração
//!
//! | Tag  | Significado      | Exemplos                |
//! |------|------------------|-------------------------|
//! | ART  | Artigo           | o, a, um, as            |
//! | N    | Substantivo      | gato, casa, professor   |
//! | ADJ  | Adjetivo         | preto, novo, forte      |
//! | V    | Verbo            | dorme, leu, corre       |
//! | ADV  | Advérbio         | muito, hoje, ontem      |
//! | PREP | Preposição       | de, em, no, sobre       |
//! | PRON | Pronome          | eu, ele, nós, meu       |
//! | NUM  | Numeral          | duas, três              |
//! | CONJ | Conjunção        | e, mas                  |
//! | PONT | Pontuação        | . , !                   |

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::tokenizer::{fold_line, split_tags};

/// Uma sentença do corpus de demonstração, anotada palavra a palavra.
pub struct TaggedSentence {
    /// O texto corrido da sentença.
    pub text: &'static str,
    /// Pares (palavra, tag POS), na ordem da sentença.
    pub tokens: &'static [(&'static str, &'static str)],
}

/// Corpus de demonstração embutido: sentenças simples do cotidiano,
/// anotadas manualmente com o tagset da tabela acima.
pub fn demo_corpus() -> Vec<TaggedSentence> {
    vec![
        TaggedSentence {
            text: "O gato preto dorme no sofá .",
            tokens: &[
                ("O", "ART"), ("gato", "N"), ("preto", "ADJ"), ("dorme", "V"),
                ("no", "PREP"), ("sofá", "N"), (".", "PONT"),
            ],
        },
        TaggedSentence {
            text: "A menina leu um livro novo .",
            tokens: &[
                ("A", "ART"), ("menina", "N"), ("leu", "V"), ("um", "ART"),
                ("livro", "N"), ("novo", "ADJ"), (".", "PONT"),
            ],
        },
        TaggedSentence {
            text: "Eu gosto de café forte",
            tokens: &[
                ("Eu", "PRON"), ("gosto", "V"), ("de", "PREP"),
                ("café", "N"), ("forte", "ADJ"),
            ],
        },
        TaggedSentence {
            text: "O cachorro corre no parque",
            tokens: &[
                ("O", "ART"), ("cachorro", "N"), ("corre", "V"),
                ("no", "PREP"), ("parque", "N"),
            ],
        },
        TaggedSentence {
            text: "Maria comprou duas maçãs vermelhas .",
            tokens: &[
                ("Maria", "N"), ("comprou", "V"), ("duas", "NUM"),
                ("maçãs", "N"), ("vermelhas", "ADJ"), (".", "PONT"),
            ],
        },
        TaggedSentence {
            text: "Nós moramos em uma casa amarela",
            tokens: &[
                ("Nós", "PRON"), ("moramos", "V"), ("em", "PREP"),
                ("uma", "ART"), ("casa", "N"), ("amarela", "ADJ"),
            ],
        },
        TaggedSentence {
            text: "O tempo voa",
            tokens: &[("O", "ART"), ("tempo", "N"), ("voa", "V")],
        },
        TaggedSentence {
            text: "As moscas voam sobre a fruta",
            tokens: &[
                ("As", "ART"), ("moscas", "N"), ("voam", "V"),
                ("sobre", "PREP"), ("a", "ART"), ("fruta", "N"),
            ],
        },
        TaggedSentence {
            text: "Ele canta e ela dança",
            tokens: &[
                ("Ele", "PRON"), ("canta", "V"), ("e", "CONJ"),
                ("ela", "PRON"), ("dança", "V"),
            ],
        },
        TaggedSentence {
            text: "O professor explica a lição hoje",
            tokens: &[
                ("O", "ART"), ("professor", "N"), ("explica", "V"),
                ("a", "ART"), ("lição", "N"), ("hoje", "ADV"),
            ],
        },
        TaggedSentence {
            text: "Meu irmão trabalha muito",
            tokens: &[
                ("Meu", "PRON"), ("irmão", "N"),
                ("trabalha", "V"), ("muito", "ADV"),
            ],
        },
        TaggedSentence {
            text: "A chuva caiu ontem",
            tokens: &[
                ("A", "ART"), ("chuva", "N"), ("caiu", "V"), ("ontem", "ADV"),
            ],
        },
    ]
}

/// Converte o corpus de demonstração no formato que o treinador consome:
/// tokens em minúsculas de um lado, tags do outro.
pub fn demo_training_pairs() -> (Vec<Vec<String>>, Vec<Vec<String>>) {
    let corpus = demo_corpus();
    let sentences = corpus
        .iter()
        .map(|s| s.tokens.iter().map(|(word, _)| word.to_lowercase()).collect())
        .collect();
    let tags = corpus
        .iter()
        .map(|s| s.tokens.iter().map(|(_, tag)| tag.to_string()).collect())
        .collect();
    (sentences, tags)
}

/// Lê e tokeniza um par de arquivos paralelos (sentenças + tags).
///
/// Linhas em branco são preservadas como vetores vazios para que os números
/// de linha dos erros de alinhamento correspondam aos arquivos originais; a
/// validação do alinhamento em si é do treinador
/// ([`crate::hmm::HmmTrainer::train`]) — a avaliação tolera diferenças e as
/// conta como posições sem par.
pub fn load_parallel_files(
    sentences_path: &Path,
    tags_path: &Path,
) -> io::Result<(Vec<Vec<String>>, Vec<Vec<String>>)> {
    let sentences = read_lines(sentences_path)?
        .iter()
        .map(|line| fold_line(line))
        .collect();
    let tags = read_lines(tags_path)?
        .iter()
        .map(|line| split_tags(line))
        .collect();
    Ok((sentences, tags))
}

fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    BufReader::new(File::open(path)?).lines().collect()
}
