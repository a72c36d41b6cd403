use std::io::{self, Write};

use super::{Product, ProductList};

/// How many products from the end of a reply are shown.
pub const DISPLAY_LIMIT: usize = 5;

pub const NO_RESULTS: &str = "No products found for this query.";

/// Price with at least one fractional digit, so `1.0` stays `1.0`.
pub fn format_price(price: f64) -> String {
    format!("{:?}", price)
}

pub fn write_product<W: Write>(out: &mut W, product: &Product) -> io::Result<()> {
    writeln!(out, "Product Name: {}", product.name)?;
    writeln!(out, "Product Details: {}", product.details)?;
    writeln!(out, "Price: ${}", format_price(product.price))?;
    writeln!(out, "{}", "-".repeat(40))
}

pub fn write_product_list<W: Write>(out: &mut W, list: &ProductList) -> io::Result<()> {
    if list.is_empty() {
        return writeln!(out, "{}", NO_RESULTS);
    }

    let shown = list.last(DISPLAY_LIMIT);
    writeln!(out, "Showing last {} products:\n", shown.len())?;
    for product in shown {
        write_product(out, product)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(list: &ProductList) -> String {
        let mut out = Vec::new();
        write_product_list(&mut out, list).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn numbered(count: usize) -> ProductList {
        ProductList {
            products: (1..=count)
                .map(|i| Product::new(&format!("Item {}", i), "details", 10.0))
                .collect(),
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1.0), "1.0");
        assert_eq!(format_price(1199.99), "1199.99");
        assert_eq!(format_price(0.0), "0.0");
    }

    #[test]
    fn test_single_product_block() {
        let list = ProductList {
            products: vec![Product::new("A", "d", 1.0)],
        };
        let expected = format!(
            "Showing last 1 products:\n\nProduct Name: A\nProduct Details: d\nPrice: $1.0\n{}\n",
            "-".repeat(40)
        );
        assert_eq!(render(&list), expected);
    }

    #[test]
    fn test_empty_list_shows_notice() {
        assert_eq!(render(&ProductList::default()), format!("{}\n", NO_RESULTS));
    }

    #[test]
    fn test_more_than_five_shows_last_five() {
        let text = render(&numbered(8));
        assert!(text.starts_with("Showing last 5 products:"));
        for hidden in 1..=3 {
            assert!(!text.contains(&format!("Product Name: Item {}\n", hidden)));
        }
        let positions: Vec<usize> = (4..=8)
            .map(|i| text.find(&format!("Product Name: Item {}\n", i)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_five_or_fewer_shows_all() {
        let text = render(&numbered(3));
        assert!(text.starts_with("Showing last 3 products:"));
        assert_eq!(text.matches("Product Name: ").count(), 3);

        let text = render(&numbered(5));
        assert_eq!(text.matches("Product Name: ").count(), 5);
    }
}
