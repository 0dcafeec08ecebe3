//! Catalog operations as the UI drives them.
//!
//! Wraps whichever `ProductRepository` the configuration selected and keeps
//! a `CatalogView` in step with successful writes. Failed calls leave the
//! view untouched and surface the error to the caller.

use crate::app::catalog_view::CatalogView;
use crate::domain::model::{Product, ProductForm, ProductId, ProductPatch};
use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;
use crate::infra::config::CatalogConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        Ok(Self::new(super::build_repository(config)?))
    }

    pub fn repository(&self) -> &Arc<dyn ProductRepository> {
        &self.repository
    }

    /// Fetches the full list into `view`. Returns whether the result was applied.
    pub async fn load(&self, view: &mut CatalogView) -> bool {
        let ticket = view.begin_load();
        let result = self.repository.list().await;
        match &result {
            Ok(products) => tracing::info!(
                "loaded {} products from {} backend",
                products.len(),
                self.repository.backend_name()
            ),
            Err(e) => tracing::warn!("product list failed: {}", e),
        }
        view.finish_load(ticket, result)
    }

    /// Validates `form` and creates the product. Nothing reaches the
    /// repository when validation fails.
    pub async fn submit(&self, form: &ProductForm) -> CatalogResult<Product> {
        let new_product = form.validate().map_err(|e| {
            tracing::debug!("product form rejected: {}", e);
            e
        })?;
        let created = self.repository.create(new_product).await?;
        tracing::info!("created product {} ({})", created.id, created.name);
        Ok(created)
    }

    /// `submit`, then shows the new product in `view` and clears the form.
    pub async fn submit_into(
        &self,
        form: &mut ProductForm,
        view: &mut CatalogView,
    ) -> CatalogResult<Product> {
        let created = self.submit(form).await?;
        view.apply_created(created.clone());
        form.reset();
        Ok(created)
    }

    pub async fn update(
        &self,
        view: &mut CatalogView,
        id: &ProductId,
        patch: ProductPatch,
    ) -> CatalogResult<Product> {
        let updated = self.repository.update(id, patch).await?;
        tracing::info!("updated product {}", id);
        view.apply_updated(updated.clone());
        Ok(updated)
    }

    pub async fn remove(&self, view: &mut CatalogView, id: &ProductId) -> CatalogResult<bool> {
        let removed = self.repository.delete(id).await?;
        tracing::info!("removed product {}", id);
        view.apply_removed(id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::catalog_view::ViewStatus;
    use crate::domain::model::{Category, ValidationError};
    use crate::error::CatalogError;
    use crate::storage::{LocalProductRepository, MemoryStore};

    fn service() -> CatalogService {
        let repo = LocalProductRepository::with_seed(Arc::new(MemoryStore::new()), Vec::new());
        CatalogService::new(Arc::new(repo))
    }

    fn filled_form() -> ProductForm {
        ProductForm {
            name: "  Teclado mecânico ".to_string(),
            category: Category::Computers,
            price: "349.90".to_string(),
            description: "Switches marrons".to_string(),
            image_url: "https://img.example.com/teclado.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn submit_into_shows_product_and_clears_form() {
        let service = service();
        let mut view = CatalogView::new(6);
        assert!(service.load(&mut view).await);
        assert_eq!(view.status(), &ViewStatus::Empty);

        let mut form = filled_form();
        let created = service.submit_into(&mut form, &mut view).await.unwrap();

        assert_eq!(created.name, "Teclado mecânico");
        assert_eq!(form, ProductForm::default());
        assert_eq!(view.status(), &ViewStatus::Ready);
        assert_eq!(view.page().items, vec![created]);
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_and_kept() {
        let service = service();
        let mut view = CatalogView::new(6);
        service.load(&mut view).await;

        let mut form = ProductForm {
            price: "0".to_string(),
            ..filled_form()
        };
        let err = service.submit_into(&mut form, &mut view).await.unwrap_err();

        assert!(matches!(err, CatalogError::Validation(ValidationError::InvalidPrice)));
        assert_eq!(form.price, "0");
        assert!(service.repository().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_and_remove_keep_view_in_step() {
        let service = service();
        let mut view = CatalogView::new(6);
        service.load(&mut view).await;
        let created = service.submit_into(&mut filled_form(), &mut view).await.unwrap();

        let patch = ProductPatch {
            price: Some(299.9),
            ..Default::default()
        };
        service.update(&mut view, &created.id, patch).await.unwrap();
        assert_eq!(view.products()[0].price, 299.9);

        assert!(service.remove(&mut view, &created.id).await.unwrap());
        assert!(view.products().is_empty());
        assert_eq!(view.status(), &ViewStatus::Empty);
    }

    #[tokio::test]
    async fn failed_update_leaves_view_alone() {
        let service = service();
        let mut view = CatalogView::new(6);
        service.load(&mut view).await;

        let err = service
            .update(&mut view, &ProductId::Number(42), ProductPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert!(view.products().is_empty());
    }
}
