//! Query documents and request/response shapes.

use serde::{Deserialize, Serialize};

use talawa_core::Result;
use talawa_core::paginate::Page;
use talawa_core::types::Cursor;

// ============================================================================
// Documents
// ============================================================================

/// Operation name of [`ORGANIZATION_POSTS`].
pub const ORGANIZATION_POSTS_OP: &str = "OrganizationPosts";

/// Posts of an organization.
pub const ORGANIZATION_POSTS: &str = r#"
query OrganizationPosts($input: QueryOrganizationInput!, $first: Int!, $after: String) {
  organization(input: $input) {
    postsCount
    posts(first: $first, after: $after) {
      edges {
        node {
          id
          caption
          createdAt
          upVotesCount
          commentsCount
          creator { id name }
        }
      }
      pageInfo { endCursor hasNextPage }
    }
  }
}
"#;

/// Operation name of [`POST_COMMENTS`].
pub const POST_COMMENTS_OP: &str = "PostComments";

/// Comments of a post.
pub const POST_COMMENTS: &str = r#"
query PostComments($input: QueryPostInput!, $first: Int!, $after: String) {
  post(input: $input) {
    commentsCount
    comments(first: $first, after: $after) {
      edges {
        node {
          id
          body
          createdAt
          upVotesCount
          creator { id name }
        }
      }
      pageInfo { endCursor hasNextPage }
    }
  }
}
"#;

/// Operation name of [`POST_UP_VOTERS`].
pub const POST_UP_VOTERS_OP: &str = "PostUpVoters";

/// Up-voters of a post.
pub const POST_UP_VOTERS: &str = r#"
query PostUpVoters($input: QueryPostInput!, $first: Int!, $after: String) {
  post(input: $input) {
    upVotesCount
    upVoters(first: $first, after: $after) {
      edges { node { id name avatarURL } }
      pageInfo { endCursor hasNextPage }
    }
  }
}
"#;

/// Operation name of [`COMMENT_UP_VOTERS`].
pub const COMMENT_UP_VOTERS_OP: &str = "CommentUpVoters";

/// Up-voters of a comment.
pub const COMMENT_UP_VOTERS: &str = r#"
query CommentUpVoters($input: QueryCommentInput!, $first: Int!, $after: String) {
  comment(input: $input) {
    upVotesCount
    upVoters(first: $first, after: $after) {
      edges { node { id name avatarURL } }
      pageInfo { endCursor hasNextPage }
    }
  }
}
"#;

// ============================================================================
// Envelope
// ============================================================================

/// Request body of a GraphQL POST.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<'a, V> {
    pub operation_name: &'a str,
    pub query: &'a str,
    pub variables: &'a V,
}

/// One entry of a response's `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// Response body of a GraphQL POST.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<D> {
    #[serde(default = "Option::default")]
    pub data: Option<D>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

// ============================================================================
// Variables
// ============================================================================

/// `{ input: { id } }` lookup plus connection arguments.
#[derive(Debug, Serialize)]
pub struct ConnectionVariables<'a> {
    pub input: IdInput<'a>,
    pub first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct IdInput<'a> {
    pub id: &'a str,
}

// ============================================================================
// Connections
// ============================================================================

/// A Relay connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

impl<T> Connection<T> {
    /// Convert into a [`Page`].
    ///
    /// A missing `pageInfo` means a terminal page; an empty `endCursor` is
    /// treated as absent.
    pub fn into_page(self, total_count: Option<u64>) -> Result<Page<T>> {
        let page_info = self.page_info.unwrap_or_default();
        let end_cursor = match page_info.end_cursor {
            Some(cursor) if !cursor.is_empty() => Some(Cursor::new(cursor)?),
            _ => None,
        };

        let items = self.edges.into_iter().map(|edge| edge.node).collect();
        let mut page = Page::new(items, end_cursor, page_info.has_next_page);
        page.total_count = total_count;
        Ok(page)
    }
}

// ============================================================================
// Query data
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OrganizationPostsData<T> {
    pub organization: Option<OrganizationPostsNode<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPostsNode<T> {
    #[serde(default)]
    pub posts_count: Option<u64>,
    pub posts: Connection<T>,
}

#[derive(Debug, Deserialize)]
pub struct PostCommentsData<T> {
    pub post: Option<PostCommentsNode<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentsNode<T> {
    #[serde(default)]
    pub comments_count: Option<u64>,
    pub comments: Connection<T>,
}

#[derive(Debug, Deserialize)]
pub struct PostUpVotersData<T> {
    pub post: Option<UpVotersNode<T>>,
}

#[derive(Debug, Deserialize)]
pub struct CommentUpVotersData<T> {
    pub comment: Option<UpVotersNode<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpVotersNode<T> {
    #[serde(default)]
    pub up_votes_count: Option<u64>,
    pub up_voters: Connection<T>,
}
