//! 商品服务
//!
//! 在通用 mock 服务之上提供商品目录常用的查询与批量操作。

use std::ops::Deref;
use std::time::Duration;

use serde_json::Value;
use showcase_shared::Result;
use tracing::info;

use super::enhanced::{EnhancedMockService, ServiceOptions};
use super::traits::{DataService, ReadonlyDataService};
use crate::models::product::PRODUCT_ID_PREFIX;
use crate::models::{Entity, EntityId, Product, ProductDraft, ProductPatch, sample_products};
use crate::network::NetworkOptions;
use crate::query::{DataResult, EntityResult, QueryOptions, SortSpec};
use crate::store::prefixed_id_generator;

/// 低库存的默认阈值
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// 商品服务配置
pub struct ProductServiceOptions {
    pub service: ServiceOptions<Product>,
    /// 未提供初始数据时是否载入示例商品
    pub use_sample_data: bool,
}

impl Default for ProductServiceOptions {
    fn default() -> Self {
        Self {
            service: ServiceOptions::default(),
            use_sample_data: true,
        }
    }
}

/// 商品服务
#[derive(Debug)]
pub struct ProductService {
    inner: EnhancedMockService<Product>,
}

impl Deref for ProductService {
    type Target = EnhancedMockService<Product>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for ProductService {
    fn default() -> Self {
        Self::new(ProductServiceOptions::default())
    }
}

impl ProductService {
    pub fn new(options: ProductServiceOptions) -> Self {
        let ProductServiceOptions {
            service,
            use_sample_data,
        } = options;

        let initial_data = service.initial_data.unwrap_or_else(|| {
            if use_sample_data {
                sample_products()
            } else {
                Vec::new()
            }
        });

        let inner = EnhancedMockService::new(ServiceOptions {
            initial_data: Some(initial_data),
            entity_name: service
                .entity_name
                .or_else(|| Some(Product::NAME.to_string())),
            id_generator: Some(
                service
                    .id_generator
                    .unwrap_or_else(|| prefixed_id_generator(PRODUCT_ID_PREFIX)),
            ),
            network: service.network,
            searchable_fields: service
                .searchable_fields
                .or_else(|| Some(vec!["name".to_string(), "category".to_string()])),
        });

        Self { inner }
    }

    /// 按名称或类别搜索，结果按名称升序
    pub async fn search_products(
        &self,
        term: &str,
        options: &NetworkOptions,
    ) -> Result<DataResult<Product>> {
        let query = QueryOptions::new()
            .search(term)
            .sort_by(SortSpec::asc("name"));
        self.inner.query(&query, options).await
    }

    /// 按类别过滤（大小写不敏感的子串匹配），结果按名称升序
    pub async fn find_by_category(
        &self,
        category: &str,
        options: &NetworkOptions,
    ) -> Result<DataResult<Product>> {
        let query = QueryOptions::new()
            .filter("category", Value::from(category))
            .sort_by(SortSpec::asc("name"));
        self.inner.query(&query, options).await
    }

    /// 库存严格低于阈值的商品
    pub async fn find_low_stock(
        &self,
        threshold: u32,
        options: &NetworkOptions,
    ) -> Result<DataResult<Product>> {
        let products = self
            .inner
            .with_store(options, |store| store.filter(|p| p.stock < threshold))
            .await?;
        let count = products.len();
        Ok(DataResult::ok(products, count))
    }

    /// 价格在闭区间 `[min, max]` 内的商品
    pub async fn find_by_price_range(
        &self,
        min: f64,
        max: f64,
        options: &NetworkOptions,
    ) -> Result<DataResult<Product>> {
        let products = self
            .inner
            .with_store(options, |store| {
                store.filter(|p| p.price >= min && p.price <= max)
            })
            .await?;
        let count = products.len();
        Ok(DataResult::ok(products, count))
    }

    pub async fn update_stock(
        &self,
        id: &EntityId,
        stock: u32,
        options: &NetworkOptions,
    ) -> Result<EntityResult<Product>> {
        let patch = ProductPatch {
            stock: Some(stock),
            ..Default::default()
        };
        self.inner.update(id, &patch, options).await
    }

    pub async fn update_price(
        &self,
        id: &EntityId,
        price: f64,
        options: &NetworkOptions,
    ) -> Result<EntityResult<Product>> {
        let patch = ProductPatch {
            price: Some(price),
            ..Default::default()
        };
        self.inner.update(id, &patch, options).await
    }

    /// 批量创建
    ///
    /// 整批只模拟一次网络，逐条创建时不再等待，错误率取服务默认值
    pub async fn create_batch(
        &self,
        drafts: Vec<ProductDraft>,
        options: &NetworkOptions,
    ) -> Result<DataResult<Product>> {
        self.inner.network_simulator().simulate(options).await?;

        let per_item = NetworkOptions {
            delay: Some(Duration::ZERO),
            ..Default::default()
        };

        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            if let Some(product) = self.inner.create(draft, &per_item).await?.data {
                created.push(product);
            }
        }

        info!(count = created.len(), "批量创建商品");
        let count = created.len();
        Ok(DataResult::ok(created, count))
    }

    /// 删除类别完全匹配的商品，返回删除数量
    pub async fn delete_by_category(
        &self,
        category: &str,
        options: &NetworkOptions,
    ) -> Result<EntityResult<usize>> {
        let deleted = self
            .inner
            .with_store(options, |store| {
                store.delete_many(|p| p.category == category)
            })
            .await?;
        info!(category, deleted, "按类别删除商品");
        Ok(EntityResult::found(deleted))
    }

    /// 库存总价值（单价 × 库存之和）
    pub async fn calculate_inventory_value(
        &self,
        options: &NetworkOptions,
    ) -> Result<EntityResult<f64>> {
        let total = self
            .inner
            .with_store(options, |store| {
                store.map(|p| p.inventory_value()).into_iter().sum::<f64>()
            })
            .await?;
        Ok(EntityResult::found(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::SimulatorConfig;

    fn service() -> ProductService {
        ProductService::new(ProductServiceOptions {
            service: ServiceOptions::default().with_network(SimulatorConfig::fixed(Duration::ZERO)),
            ..Default::default()
        })
    }

    fn net() -> NetworkOptions {
        NetworkOptions::default()
    }

    #[tokio::test]
    async fn test_defaults_to_sample_data() {
        let service = service();
        assert_eq!(service.data_store().count(), 5);
        assert_eq!(service.entity_name(), "Product");
        assert_eq!(service.searchable_fields(), ["name", "category"]);
    }

    #[tokio::test]
    async fn test_without_sample_data() {
        let service = ProductService::new(ProductServiceOptions {
            use_sample_data: false,
            ..Default::default()
        });
        assert_eq!(service.data_store().count(), 0);
    }

    #[tokio::test]
    async fn test_find_low_stock() {
        let service = service();
        let result = service.find_low_stock(10, &net()).await.unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.rows()[0].stock, 8);

        // 严格小于
        let result = service.find_low_stock(8, &net()).await.unwrap();
        assert_eq!(result.count, 0);
    }

    #[tokio::test]
    async fn test_find_by_price_range_inclusive() {
        let service = service();
        let result = service
            .find_by_price_range(59.99, 299.99, &net())
            .await
            .unwrap();
        let ids: Vec<String> = result.rows().iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_search_and_category() {
        let service = service();
        let result = service.search_products("electr", &net()).await.unwrap();
        let names: Vec<&str> = result.rows().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Product A", "Product C"]);

        let result = service.find_by_category("furn", &net()).await.unwrap();
        assert_eq!(result.count, 1);
    }

    #[tokio::test]
    async fn test_update_stock_and_price() {
        let service = service();
        let id = EntityId::from("2");

        let result = service.update_stock(&id, 99, &net()).await.unwrap();
        assert_eq!(result.data.unwrap().stock, 99);

        let result = service.update_price(&id, 1.5, &net()).await.unwrap();
        let product = result.data.unwrap();
        assert_eq!(product.price, 1.5);
        assert_eq!(product.stock, 99);

        let result = service
            .update_stock(&EntityId::from("missing"), 1, &net())
            .await
            .unwrap();
        assert!(result.error.unwrap().is_not_found());
    }

    #[tokio::test]
    async fn test_create_batch() {
        let service = service();
        let drafts = vec![ProductDraft::default(), ProductDraft::default()];
        let result = service.create_batch(drafts, &net()).await.unwrap();

        assert_eq!(result.count, 2);
        for product in result.rows() {
            assert!(product.id.to_string().starts_with(PRODUCT_ID_PREFIX));
        }
        assert_eq!(service.data_store().count(), 7);
    }

    #[tokio::test]
    async fn test_create_batch_error_rate_applies_to_whole_batch() {
        let options = NetworkOptions::default().with_error_rate(0.5);
        for _ in 0..50 {
            let service = service();
            let result = service
                .create_batch(vec![ProductDraft::default(); 10], &options)
                .await;
            match result {
                Ok(created) => {
                    assert_eq!(created.count, 10);
                    assert_eq!(service.data_store().count(), 15);
                }
                Err(_) => assert_eq!(service.data_store().count(), 5),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_batch_waits_once() {
        let service = ProductService::new(ProductServiceOptions {
            service: ServiceOptions::default()
                .with_network(SimulatorConfig::fixed(Duration::from_millis(100))),
            ..Default::default()
        });
        let start = tokio::time::Instant::now();
        service
            .create_batch(vec![ProductDraft::default(); 5], &net())
            .await
            .unwrap();
        assert!(start.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_delete_by_category_exact_match() {
        let service = service();

        let result = service.delete_by_category("electronic", &net()).await.unwrap();
        assert_eq!(result.data, Some(0));

        let result = service.delete_by_category("Electronics", &net()).await.unwrap();
        assert_eq!(result.data, Some(2));
        assert_eq!(service.get_all(&net()).await.unwrap().count, 3);
    }

    #[tokio::test]
    async fn test_calculate_inventory_value() {
        let service = service();
        let result = service.calculate_inventory_value(&net()).await.unwrap();
        let expected = 499.99 * 25.0 + 199.5 * 12.0 + 299.99 * 8.0 + 59.99 * 42.0 + 29.99 * 65.0;
        assert!((result.data.unwrap() - expected).abs() < 1e-6);
    }
}
