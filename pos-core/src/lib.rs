//! # pos-core — Etiquetador Morfossintático com HMM Bigrama
//!
//! Este crate implementa um etiquetador POS (part-of-speech) clássico: um
//! Hidden Markov Model bigrama treinado por contagem sobre corpora paralelos
//! (sentenças + tags-ouro) e decodificado pelo algoritmo de Viterbi. Foi
//! projetado para ser didático e pequeno, com cada etapa do pipeline em um
//! módulo próprio.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui em uma direção, e as tabelas treinadas nunca mudam depois de
//! prontas:
//!
//! 1. **Corpus** ([`corpus`]): pares de arquivos paralelos (ou o corpus de
//!    demonstração embutido) viram sequências de tokens e tags alinhadas.
//! 2. **Tokenização** ([`tokenizer`]): case-folding obrigatório e divisão por
//!    espaços; texto livre também perde a pontuação de sentença.
//! 3. **Treinamento** ([`hmm`]): uma passada de contagem + uma passada de
//!    normalização produzem as duas tabelas de log-probabilidades.
//! 4. **Tabelas** ([`model`]): transição e emissão esparsas, imutáveis,
//!    consultadas via `Option` (ausência = "nunca visto", não zero).
//! 5. **Decodificação** ([`viterbi`]): Viterbi esparso com penalidade fixa
//!    para palavras desconhecidas.
//! 6. **Avaliação** ([`evaluation`]): comparação posição a posição contra as
//!    tags-ouro, em paralelo por sentença.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use pos_core::corpus::demo_training_pairs;
//! use pos_core::hmm::HmmTrainer;
//! use pos_core::tokenizer::tokenize;
//!
//! // 1. Treina com o corpus embutido (ou com seus próprios arquivos)
//! let (sentences, tags) = demo_training_pairs();
//! let model = HmmTrainer::train(&sentences, &tags).expect("corpus embutido alinhado");
//!
//! // 2. Etiqueta uma sentença nova
//! let tokens = tokenize("O gato dorme.");
//! let predicted = model.decode(&tokens).expect("modelo treinado");
//! assert_eq!(predicted, vec!["ART", "N", "V"]);
//! ```
//!
//! ## Escopo
//!
//! Modelo bigrama por máxima verossimilhança, sem smoothing além da
//! penalidade fixa de decodificação para palavras não vistas. Sem n-gramas de
//! ordem superior e sem retreinamento incremental: para mudar o modelo,
//! treina-se de novo.

pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod hmm;
pub mod model;
pub mod tokenizer;
pub mod viterbi;

pub use error::{DecodingError, TrainingError};
pub use evaluation::{evaluate, evaluate_corpus, EvalReport};
pub use hmm::HmmTrainer;
pub use model::{EmissionTable, HmmModel, TransitionTable, START_TAG};
pub use viterbi::{viterbi_decode, ViterbiResult, DEFAULT_UNSEEN_PENALTY};
