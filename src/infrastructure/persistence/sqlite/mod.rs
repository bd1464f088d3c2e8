//! SQLite 持久化实现

mod audio_file_repo;
mod database;
mod voice_clone_repo;

pub use audio_file_repo::SqliteAudioFileRepository;
pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
pub use voice_clone_repo::SqliteVoiceCloneRepository;
