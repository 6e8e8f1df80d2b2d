use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::promotion::Promotion;
use crate::errors::DomainError;
use crate::store::catalog::Catalog;

/// Stock the shop opens with when the config file does not list its own products.
const BUILTIN_PRODUCTS: &[SeedContract] = &[
    SeedContract {
        id: "macbook-air-m2",
        name: "MacBook Air M2",
        price_cents: 145_000,
        quantity: 100,
        kind: SeedKind::Stocked,
        maximum: None,
        promotion: Some(SeedPromotion::SecondHalfPrice),
        percent: None,
    },
    SeedContract {
        id: "bose-qc-earbuds",
        name: "Bose QuietComfort Earbuds",
        price_cents: 25_000,
        quantity: 500,
        kind: SeedKind::Stocked,
        maximum: None,
        promotion: Some(SeedPromotion::ThirdOneFree),
        percent: None,
    },
    SeedContract {
        id: "google-pixel-7",
        name: "Google Pixel 7",
        price_cents: 50_000,
        quantity: 250,
        kind: SeedKind::Stocked,
        maximum: None,
        promotion: None,
        percent: None,
    },
    SeedContract {
        id: "windows-license",
        name: "Windows License",
        price_cents: 12_500,
        quantity: 0,
        kind: SeedKind::NonStocked,
        maximum: None,
        promotion: Some(SeedPromotion::PercentDiscount),
        percent: Some(30),
    },
    SeedContract {
        id: "shipping",
        name: "Shipping",
        price_cents: 1_000,
        quantity: 250,
        kind: SeedKind::Limited,
        maximum: Some(1),
        promotion: None,
        percent: None,
    },
];

struct SeedContract {
    id: &'static str,
    name: &'static str,
    price_cents: i64,
    quantity: u32,
    kind: SeedKind,
    maximum: Option<u32>,
    promotion: Option<SeedPromotion>,
    percent: Option<i64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedKind {
    #[default]
    Stocked,
    NonStocked,
    Limited,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPromotion {
    SecondHalfPrice,
    ThirdOneFree,
    PercentDiscount,
}

/// Flat, file-friendly description of a product (`[[catalog.products]]`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSeed {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub kind: SeedKind,
    #[serde(default)]
    pub maximum: Option<u32>,
    #[serde(default)]
    pub promotion: Option<SeedPromotion>,
    #[serde(default)]
    pub percent: Option<Decimal>,
}

impl ProductSeed {
    pub fn to_product(&self) -> Result<Product, DomainError> {
        let product = match self.kind {
            SeedKind::Stocked => {
                Product::new(self.id.as_str(), self.name.as_str(), self.price, self.quantity)?
            }
            SeedKind::NonStocked => {
                if self.quantity != 0 {
                    return Err(DomainError::NonStockedQuantity(self.name.clone()));
                }
                Product::non_stocked(self.id.as_str(), self.name.as_str(), self.price)?
            }
            SeedKind::Limited => {
                let maximum = self.maximum.ok_or_else(|| {
                    DomainError::InvalidProduct(format!(
                        "limited product `{}` needs a `maximum`",
                        self.id
                    ))
                })?;
                Product::limited(
                    self.id.as_str(),
                    self.name.as_str(),
                    self.price,
                    self.quantity,
                    maximum,
                )?
            }
        };

        match self.promotion {
            None => Ok(product),
            Some(SeedPromotion::SecondHalfPrice) => {
                product.with_promotion(Promotion::SecondHalfPrice)
            }
            Some(SeedPromotion::ThirdOneFree) => product.with_promotion(Promotion::ThirdOneFree),
            Some(SeedPromotion::PercentDiscount) => {
                let percent = self.percent.ok_or_else(|| {
                    DomainError::InvalidPromotion(format!(
                        "percent discount on `{}` needs a `percent`",
                        self.id
                    ))
                })?;
                product.with_promotion(Promotion::percent_discount(percent)?)
            }
        }
    }
}

pub fn builtin_seeds() -> Vec<ProductSeed> {
    BUILTIN_PRODUCTS
        .iter()
        .map(|contract| ProductSeed {
            id: contract.id.to_string(),
            name: contract.name.to_string(),
            price: Decimal::new(contract.price_cents, 2),
            quantity: contract.quantity,
            kind: contract.kind,
            maximum: contract.maximum,
            promotion: contract.promotion,
            percent: contract.percent.map(Decimal::from),
        })
        .collect()
}

pub fn build_catalog(seeds: &[ProductSeed]) -> Result<Catalog, DomainError> {
    let products = seeds.iter().map(ProductSeed::to_product).collect::<Result<Vec<_>, _>>()?;
    Catalog::new(products)
}

pub fn default_catalog() -> Result<Catalog, DomainError> {
    build_catalog(&builtin_seeds())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{build_catalog, default_catalog, ProductSeed, SeedKind, SeedPromotion};
    use crate::domain::product::{ProductId, ProductKind};
    use crate::errors::DomainError;

    fn seed(id: &str) -> ProductSeed {
        ProductSeed {
            id: id.to_string(),
            name: "Thing".to_string(),
            price: Decimal::new(10, 0),
            quantity: 5,
            kind: SeedKind::Stocked,
            maximum: None,
            promotion: None,
            percent: None,
        }
    }

    #[test]
    fn default_catalog_opens_with_five_products_in_order() {
        let catalog = default_catalog().expect("built-in seeds are valid");

        let names: Vec<&str> = catalog.list().iter().map(|product| product.name()).collect();
        assert_eq!(
            names,
            vec![
                "MacBook Air M2",
                "Bose QuietComfort Earbuds",
                "Google Pixel 7",
                "Windows License",
                "Shipping",
            ]
        );
        assert_eq!(catalog.total_quantity(), 1_100);
    }

    #[test]
    fn default_catalog_carries_kinds_and_promotions() {
        let catalog = default_catalog().expect("built-in seeds are valid");

        let license = catalog
            .find(&ProductId("windows-license".to_string()))
            .expect("license is seeded");
        assert_eq!(license.kind(), ProductKind::NonStocked);
        assert_eq!(license.promotion().map(|promotion| promotion.name()).as_deref(), Some("30% off!"));

        let shipping =
            catalog.find(&ProductId("shipping".to_string())).expect("shipping is seeded");
        assert_eq!(shipping.purchase_limit(), Some(1));
        assert_eq!(shipping.price(), Decimal::new(10, 0));
    }

    #[test]
    fn limited_seed_without_maximum_is_rejected() {
        let mut limited = seed("limited");
        limited.kind = SeedKind::Limited;

        assert!(matches!(limited.to_product(), Err(DomainError::InvalidProduct(_))));
    }

    #[test]
    fn percent_promotion_needs_a_percent() {
        let mut promoted = seed("promoted");
        promoted.promotion = Some(SeedPromotion::PercentDiscount);
        assert!(matches!(promoted.to_product(), Err(DomainError::InvalidPromotion(_))));

        promoted.percent = Some(Decimal::new(15, 0));
        let product = promoted.to_product().expect("percent supplied");
        assert_eq!(product.price_for(2), Ok(Decimal::new(17, 0)));
    }

    #[test]
    fn non_stocked_seed_with_quantity_is_rejected() {
        let mut license = seed("license");
        license.kind = SeedKind::NonStocked;

        assert!(matches!(license.to_product(), Err(DomainError::NonStockedQuantity(_))));
    }

    #[test]
    fn duplicate_seed_ids_are_rejected() {
        let error = build_catalog(&[seed("a"), seed("a")]).expect_err("duplicate id");
        assert!(matches!(error, DomainError::DuplicateProduct(_)));
    }

    #[test]
    fn seeds_parse_from_toml_with_integer_prices() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            products: Vec<ProductSeed>,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
[[products]]
id = "kettle"
name = "Kettle"
price = 40
quantity = 3

[[products]]
id = "gift-wrap"
name = "Gift Wrap"
price = 2.5
kind = "limited"
quantity = 10
maximum = 2
promotion = "third_one_free"
"#,
        )
        .expect("valid toml");

        assert_eq!(parsed.products[0].price, Decimal::new(40, 0));
        assert_eq!(parsed.products[0].kind, SeedKind::Stocked);
        assert_eq!(parsed.products[1].maximum, Some(2));

        let catalog = build_catalog(&parsed.products).expect("valid seeds");
        assert_eq!(catalog.total_quantity(), 13);
    }
}
