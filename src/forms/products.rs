use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{ImageMetadata, NewProduct, Product, ProductAttributes};
use crate::domain::types::{
    CategoryName, ProductDescription, ProductId, ProductName, ProductPrice, ProductState,
    ShippingType, TypeConstraintError,
};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_optional<T>(value: Option<String>) -> Result<Option<T>, TypeConstraintError>
where
    T: for<'a> TryFrom<&'a str, Error = TypeConstraintError>,
{
    non_blank(value).map(|v| T::try_from(v.as_str())).transpose()
}

/// Selected image, as reported by the file picker.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUploadField {
    pub name: Option<String>,
    pub size: Option<u64>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

impl From<ImageUploadField> for ImageMetadata {
    fn from(value: ImageUploadField) -> Self {
        Self {
            name: non_blank(value.name).unwrap_or_else(|| "image".to_string()),
            size: value.size.unwrap_or(0),
            content_type: non_blank(value.content_type).unwrap_or_else(|| "image/png".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0.0))]
    pub final_price: Option<f64>,
    #[validate(length(min = 1))]
    pub category: String,
    pub subcategory: Option<String>,
    pub shipping_type: Option<String>,
    pub state: Option<String>,
    pub image: Option<ImageUploadField>,
    #[serde(flatten)]
    pub attributes: ProductAttributes,
}

/// Validated fields shared by the create and edit forms.
#[derive(Debug, Clone, PartialEq)]
pub struct AddProductFormPayload {
    pub name: ProductName,
    pub description: ProductDescription,
    pub price: ProductPrice,
    pub final_price: Option<ProductPrice>,
    pub category: CategoryName,
    pub subcategory: Option<String>,
    pub shipping_type: Option<ShippingType>,
    pub state: Option<ProductState>,
    pub image_metadata: Option<ImageMetadata>,
    pub attributes: ProductAttributes,
}

impl AddProductFormPayload {
    pub fn into_new_product(self) -> NewProduct {
        let mut product = NewProduct::new(
            self.name,
            self.description,
            self.price,
            self.category,
        );
        product.final_price = self.final_price;
        product.subcategory = self.subcategory;
        product.shipping_type = self.shipping_type;
        product.state = self.state;
        product.image_metadata = self.image_metadata;
        product.attributes = self.attributes;
        product
    }
}

#[derive(Debug, Error)]
pub enum AddProductFormError {
    #[error("Add product form validation failed: {0}")]
    Validation(String),
    #[error("Add product form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddProductForm> for AddProductFormPayload {
    type Error = AddProductFormError;

    fn try_from(value: AddProductForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: ProductName::new(value.name)?,
            description: ProductDescription::new(value.description)?,
            price: ProductPrice::new(value.price)?,
            final_price: value.final_price.map(ProductPrice::new).transpose()?,
            category: CategoryName::new(value.category)?,
            subcategory: non_blank(value.subcategory),
            shipping_type: parse_optional(value.shipping_type)?,
            state: parse_optional(value.state)?,
            image_metadata: value.image.map(ImageMetadata::from),
            attributes: value.attributes,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: AddProductForm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditProductFormPayload {
    pub id: ProductId,
    pub fields: AddProductFormPayload,
}

impl EditProductFormPayload {
    /// Overlay the edited fields onto the stored record.
    ///
    /// Identity, cid, timestamps, image URL and sync flag are kept; the image
    /// metadata is kept unless a new image was selected.
    pub fn apply_to(self, existing: Product) -> Product {
        let fields = self.fields;
        Product {
            name: fields.name.into_inner(),
            description: fields.description.into_inner(),
            price: fields.price,
            final_price: fields.final_price,
            category: fields.category.into_inner(),
            subcategory: fields.subcategory,
            shipping_type: fields.shipping_type,
            state: fields.state.unwrap_or(existing.state),
            image_metadata: fields.image_metadata.or(existing.image_metadata),
            attributes: fields.attributes,
            ..existing
        }
    }
}

#[derive(Debug, Error)]
pub enum EditProductFormError {
    #[error("Edit product form validation failed: {0}")]
    Validation(String),
    #[error("Edit product form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for EditProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for EditProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl From<AddProductFormError> for EditProductFormError {
    fn from(value: AddProductFormError) -> Self {
        match value {
            AddProductFormError::Validation(message) => Self::Validation(message),
            AddProductFormError::TypeConstraint(message) => Self::TypeConstraint(message),
        }
    }
}

impl TryFrom<EditProductForm> for EditProductFormPayload {
    type Error = EditProductFormError;

    fn try_from(value: EditProductForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            id: ProductId::parse(&value.id)?,
            fields: AddProductFormPayload::try_from(value.fields)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ProductCid;
    use chrono::DateTime;

    fn sample_form() -> AddProductForm {
        AddProductForm {
            name: " Strawberry Cake ".to_string(),
            description: "Fresh cream".to_string(),
            price: 150.0,
            final_price: Some(159.0),
            category: "CAKE".to_string(),
            subcategory: Some("  ".to_string()),
            shipping_type: Some("courier".to_string()),
            state: None,
            image: None,
            attributes: ProductAttributes::default(),
        }
    }

    #[test]
    fn add_form_builds_new_product() {
        let payload: AddProductFormPayload = sample_form().try_into().unwrap();
        let product = payload.into_new_product();

        assert_eq!(product.name, "Strawberry Cake");
        assert_eq!(product.shipping_type, Some(ShippingType::Courier));
        assert_eq!(product.subcategory, None);
        assert_eq!(product.state, None);
        assert!(product.cid.is_none());
    }

    #[test]
    fn add_form_rejects_empty_name() {
        let mut form = sample_form();
        form.name = String::new();
        let result: Result<AddProductFormPayload, _> = form.try_into();
        assert!(matches!(result, Err(AddProductFormError::Validation(_))));
    }

    #[test]
    fn add_form_rejects_whitespace_category() {
        let mut form = sample_form();
        form.category = "   ".to_string();
        let result: Result<AddProductFormPayload, _> = form.try_into();
        assert!(matches!(result, Err(AddProductFormError::TypeConstraint(_))));
    }

    #[test]
    fn add_form_rejects_negative_price() {
        let mut form = sample_form();
        form.price = -1.0;
        let result: Result<AddProductFormPayload, _> = form.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn add_form_rejects_unknown_state() {
        let mut form = sample_form();
        form.state = Some("ARCHIVED".to_string());
        let result: Result<AddProductFormPayload, _> = form.try_into();
        assert!(matches!(result, Err(AddProductFormError::TypeConstraint(_))));
    }

    #[test]
    fn image_defaults_fill_missing_metadata() {
        let metadata = ImageMetadata::from(ImageUploadField {
            name: None,
            size: None,
            content_type: None,
        });
        assert_eq!(metadata.name, "image");
        assert_eq!(metadata.size, 0);
        assert_eq!(metadata.content_type, "image/png");
    }

    #[test]
    fn edit_payload_keeps_identity_and_image() {
        let now = DateTime::from_timestamp(0, 0).unwrap();
        let mut new_product = NewProduct::new("Old", "Old", ProductPrice::new(1.0).unwrap(), "CAKE");
        new_product.image_metadata = Some(ImageMetadata {
            name: "old.png".into(),
            size: 10,
            content_type: "image/png".into(),
        });
        new_product.state = Some(ProductState::Draft);
        let existing =
            new_product.into_product(ProductId::generate(), ProductCid::new("CAK_1").unwrap(), now);

        let form = EditProductForm {
            id: existing.id.to_string(),
            fields: sample_form(),
        };
        let payload: EditProductFormPayload = form.try_into().unwrap();
        let edited = payload.apply_to(existing.clone());

        assert_eq!(edited.id, existing.id);
        assert_eq!(edited.cid, existing.cid);
        assert_eq!(edited.created_at, existing.created_at);
        assert_eq!(edited.name, "Strawberry Cake");
        assert_eq!(edited.state, ProductState::Draft);
        assert_eq!(edited.image_metadata, existing.image_metadata);
    }

    #[test]
    fn edit_form_rejects_bad_id() {
        let form = EditProductForm {
            id: "42".to_string(),
            fields: sample_form(),
        };
        let result: Result<EditProductFormPayload, _> = form.try_into();
        assert!(matches!(result, Err(EditProductFormError::TypeConstraint(_))));
    }
}
