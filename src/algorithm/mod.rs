// Módulo de alto nivel para la evaluación del avance de un estudiante.
// Declarar submódulos (archivos en la carpeta `src/algorithm`)
pub mod evaluators;
pub mod pool;
pub mod progress;
pub mod ranking;
pub mod transcript;

// Reexportar la API pública que usa el binario
pub use evaluators::{evaluate_group, GroupOutcome};
pub use pool::AvailablePool;
pub use progress::{evaluate_major, evaluate_major_progress, find_major};
pub use ranking::{list_majors, rank_majors, DEFAULT_TOP_N};
pub use transcript::{parse_transcript, parse_transcript_row};
