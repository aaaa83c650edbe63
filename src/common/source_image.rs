use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

/// Image handed to the preprocessor. Always stored as RGBA8.
#[derive(Debug, Clone, Default)]
pub struct SourceImage {
    pub image: RgbaImage,
}

impl std::ops::Deref for SourceImage {
    type Target = RgbaImage;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}

impl From<DynamicImage> for SourceImage {
    fn from(image: DynamicImage) -> Self {
        Self { image: image.to_rgba8() }
    }
}

impl From<RgbaImage> for SourceImage {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

impl From<RgbImage> for SourceImage {
    fn from(image: RgbImage) -> Self {
        Self { image: DynamicImage::from(image).to_rgba8() }
    }
}

impl From<GrayImage> for SourceImage {
    fn from(image: GrayImage) -> Self {
        Self { image: DynamicImage::from(image).to_rgba8() }
    }
}

impl From<SourceImage> for DynamicImage {
    fn from(image: SourceImage) -> Self {
        DynamicImage::from(image.image)
    }
}

impl SourceImage {
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self::from(image::open(path)?))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_rgba8(self) -> RgbaImage {
        self.image
    }
}
