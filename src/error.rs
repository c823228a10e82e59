use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("A carousel needs at least one slide")]
    NoSlides,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Slide index {index} is out of range for {slide_count} slides")]
    IndexOutOfRange { index: i64, slide_count: usize },

    #[error("Carousel is not mounted")]
    NotMounted,

    #[error("Unsupported timing function: {0}")]
    TimingFunction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
