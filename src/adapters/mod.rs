// Concrete collaborators behind the domain ports: local files, heuristics and HTTP services.

pub mod entities;
pub mod openai;
pub mod similarity;
pub mod storage;
pub mod text;
