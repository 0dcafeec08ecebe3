//! Product form input and client-side validation.
//!
//! Validation runs before any repository call so a rejected form never
//! reaches the network or the local store.

use super::product::{is_valid_price, Category, NewProduct};
use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("product name is required")]
    EmptyName,

    #[error("price must be a number greater than zero")]
    InvalidPrice,

    #[error("product description is required")]
    EmptyDescription,

    #[error("image URL is required")]
    EmptyImageUrl,

    #[error("image URL cannot be displayed: {0}")]
    InvalidImageUrl(String),
}

/// Raw text inputs as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub category: Category,
    pub price: String,
    pub description: String,
    pub image_url: String,
}

impl ProductForm {
    /// Checks fields in display order and returns the first failure.
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let price = parse_price(&self.price).ok_or(ValidationError::InvalidPrice)?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let image_url = self.image_url.trim();
        if image_url.is_empty() {
            return Err(ValidationError::EmptyImageUrl);
        }
        if !is_displayable_image_url(image_url) {
            return Err(ValidationError::InvalidImageUrl(image_url.to_string()));
        }

        Ok(NewProduct {
            name: name.to_string(),
            category: self.category.clone(),
            price,
            description: description.to_string(),
            image_url: image_url.to_string(),
        })
    }

    /// Back to the blank form shown after a successful submission.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    is_valid_price(value).then_some(value)
}

/// An image can only render from an absolute http(s) address with a host.
fn is_displayable_image_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ProductForm {
        ProductForm {
            name: "  Câmera Mirrorless ".to_string(),
            category: Category::Photography,
            price: "3499.90".to_string(),
            description: "24MP, 4K".to_string(),
            image_url: "https://img.example.com/camera.jpg".to_string(),
        }
    }

    #[test]
    fn valid_form_produces_trimmed_product() {
        let product = filled().validate().unwrap();
        assert_eq!(product.name, "Câmera Mirrorless");
        assert_eq!(product.category, Category::Photography);
        assert_eq!(product.price, 3499.90);
    }

    #[test]
    fn default_category_is_electronics() {
        assert_eq!(ProductForm::default().category, Category::Electronics);
    }

    #[test]
    fn rejects_blank_name_first() {
        let form = ProductForm {
            name: "   ".to_string(),
            price: "abc".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn rejects_bad_prices() {
        for price in ["", "abc", "0", "-5", "inf", "NaN"] {
            let form = ProductForm {
                price: price.to_string(),
                ..filled()
            };
            assert_eq!(form.validate(), Err(ValidationError::InvalidPrice), "price {:?}", price);
        }
    }

    #[test]
    fn rejects_missing_description_and_image() {
        let form = ProductForm {
            description: "\n".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::EmptyDescription));

        let form = ProductForm {
            image_url: String::new(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::EmptyImageUrl));
    }

    #[test]
    fn rejects_urls_that_cannot_render() {
        for url in ["camera.jpg", "ftp://files.example.com/a.jpg", "javascript:alert(1)"] {
            let form = ProductForm {
                image_url: url.to_string(),
                ..filled()
            };
            assert!(
                matches!(form.validate(), Err(ValidationError::InvalidImageUrl(_))),
                "url {:?}",
                url
            );
        }
    }

    #[test]
    fn reset_clears_inputs() {
        let mut form = filled();
        form.reset();
        assert_eq!(form, ProductForm::default());
    }
}
