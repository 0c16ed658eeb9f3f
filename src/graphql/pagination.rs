//! Cursor-based pagination for GraphQL list queries
//!
//! Connections follow the Relay shape (edges, nodes, page info) with opaque
//! base64 cursors that encode the row offset. Entity-specific connection
//! types are generated with the `define_connection!` macro.

use async_graphql::SimpleObject;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// Information about pagination in a connection
#[derive(SimpleObject, Debug, Clone, Default)]
pub struct PageInfo {
    /// When paginating forwards, are there more items?
    pub has_next_page: bool,
    /// When paginating backwards, are there more items?
    pub has_previous_page: bool,
    /// Cursor of the first item in this page
    pub start_cursor: Option<String>,
    /// Cursor of the last item in this page
    pub end_cursor: Option<String>,
    /// Total count of items matching the query
    pub total_count: Option<i64>,
}

/// An edge in a connection, pairing a node with its cursor (internal use)
#[derive(Debug, Clone)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

/// A paginated connection result (internal use)
#[derive(Debug, Clone)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

/// Define a GraphQL connection type for a specific entity
///
/// Usage:
/// ```ignore
/// define_connection!(CustomerConnection, CustomerEdge, Customer);
/// ```
#[macro_export]
macro_rules! define_connection {
    ($conn_name:ident, $edge_name:ident, $node_type:ty) => {
        /// Edge containing a node and cursor
        #[derive(async_graphql::SimpleObject, Debug, Clone)]
        pub struct $edge_name {
            /// The item at the end of the edge
            pub node: $node_type,
            /// A cursor for pagination
            pub cursor: String,
        }

        /// Connection containing edges and page info
        #[derive(async_graphql::SimpleObject, Debug, Clone)]
        pub struct $conn_name {
            /// The edges in this connection
            pub edges: Vec<$edge_name>,
            /// Pagination information
            pub page_info: $crate::graphql::pagination::PageInfo,
        }

        impl $conn_name {
            /// Create from a generic Connection
            pub fn from_connection(
                conn: $crate::graphql::pagination::Connection<$node_type>,
            ) -> Self {
                Self {
                    edges: conn
                        .edges
                        .into_iter()
                        .map(|e| $edge_name {
                            node: e.node,
                            cursor: e.cursor,
                        })
                        .collect(),
                    page_info: conn.page_info,
                }
            }
        }
    };
}

impl<T> Connection<T> {
    /// Build a connection page from a slice of the full result set
    ///
    /// `offset` is the position of the first item within the overall query
    /// result and `total` the total number of matching rows; both come from
    /// the repository's paginated list call.
    pub fn from_items(items: Vec<T>, offset: i64, total: i64) -> Self {
        let has_next_page = (offset + items.len() as i64) < total;
        let has_previous_page = offset > 0;

        let edges: Vec<Edge<T>> = items
            .into_iter()
            .enumerate()
            .map(|(i, node)| Edge {
                cursor: encode_cursor(offset + i as i64),
                node,
            })
            .collect();

        let page_info = PageInfo {
            has_next_page,
            has_previous_page,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
            total_count: Some(total),
        };

        Self { edges, page_info }
    }
}

/// Encode an offset as an opaque cursor string
pub fn encode_cursor(offset: i64) -> String {
    BASE64.encode(format!("cursor:{}", offset))
}

/// Decode a cursor string back to an offset
///
/// Only non-negative offsets are valid; a crafted cursor must not reach the
/// query layer as a negative OFFSET.
pub fn decode_cursor(cursor: &str) -> Result<i64, &'static str> {
    let decoded = BASE64.decode(cursor).map_err(|_| "invalid cursor format")?;

    let s = String::from_utf8(decoded).map_err(|_| "invalid cursor encoding")?;

    if !s.starts_with("cursor:") {
        return Err("invalid cursor prefix");
    }

    let offset: i64 = s[7..].parse().map_err(|_| "invalid cursor value")?;
    if offset < 0 {
        return Err("invalid cursor value");
    }

    Ok(offset)
}

/// Parse connection arguments into (offset, limit)
///
/// `first` defaults to 25 and is clamped to 1..=100; `after` resumes one
/// past the row the cursor points at.
pub fn parse_pagination_args(
    first: Option<i32>,
    after: Option<String>,
) -> Result<(i64, i64), &'static str> {
    let limit = first.unwrap_or(25).clamp(1, 100) as i64;

    let offset = if let Some(cursor) = after {
        decode_cursor(&cursor)? + 1
    } else {
        0
    };

    Ok((offset, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_roundtrip() {
        for offset in [0, 1, 25, 999999] {
            let cursor = encode_cursor(offset);
            let decoded = decode_cursor(&cursor).unwrap();
            assert_eq!(offset, decoded);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_cursor("not-base64!").is_err());
        // Valid base64, wrong payload
        assert!(decode_cursor(&BASE64.encode("offset:3")).is_err());
        assert!(decode_cursor(&BASE64.encode("cursor:abc")).is_err());
    }

    #[test]
    fn test_decode_rejects_negative_offsets() {
        assert_eq!(decode_cursor(&BASE64.encode("cursor:-5")), Err("invalid cursor value"));
        assert!(parse_pagination_args(None, Some(BASE64.encode("cursor:-1"))).is_err());
    }

    #[test]
    fn test_parse_pagination_default() {
        let (offset, limit) = parse_pagination_args(None, None).unwrap();
        assert_eq!(offset, 0);
        assert_eq!(limit, 25);
    }

    #[test]
    fn test_parse_pagination_with_limit() {
        let (offset, limit) = parse_pagination_args(Some(50), None).unwrap();
        assert_eq!(offset, 0);
        assert_eq!(limit, 50);
    }

    #[test]
    fn test_parse_pagination_clamps_limit() {
        let (_, limit) = parse_pagination_args(Some(1000), None).unwrap();
        assert_eq!(limit, 100);

        let (_, limit) = parse_pagination_args(Some(-5), None).unwrap();
        assert_eq!(limit, 1);
    }

    #[test]
    fn test_parse_pagination_with_cursor() {
        let cursor = encode_cursor(10);
        let (offset, limit) = parse_pagination_args(Some(25), Some(cursor)).unwrap();
        assert_eq!(offset, 11);
        assert_eq!(limit, 25);
    }

    #[test]
    fn test_page_info_flags() {
        // 10 total rows, page of 3 starting at offset 3
        let conn = Connection::from_items(vec!["d", "e", "f"], 3, 10);
        assert!(conn.page_info.has_next_page);
        assert!(conn.page_info.has_previous_page);
        assert_eq!(conn.page_info.total_count, Some(10));
        assert_eq!(conn.edges.len(), 3);
        assert_eq!(decode_cursor(conn.page_info.start_cursor.as_ref().unwrap()), Ok(3));
        assert_eq!(decode_cursor(conn.page_info.end_cursor.as_ref().unwrap()), Ok(5));

        // Final page
        let conn = Connection::from_items(vec!["j"], 9, 10);
        assert!(!conn.page_info.has_next_page);
        assert!(conn.page_info.has_previous_page);

        // Empty result
        let conn = Connection::from_items(Vec::<&str>::new(), 0, 0);
        assert!(!conn.page_info.has_next_page);
        assert!(!conn.page_info.has_previous_page);
        assert_eq!(conn.page_info.start_cursor, None);
    }
}
