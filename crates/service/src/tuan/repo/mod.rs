pub mod file;
pub mod seaorm;

pub use file::FileTuanRepository;
pub use seaorm::SeaOrmTuanRepository;
