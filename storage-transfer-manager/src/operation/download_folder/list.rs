/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::VecDeque;

use crate::error;
use crate::types::RemoteObject;

use super::worker::strip_key_prefix;
use super::DownloadFolderContext;

/// Paginated stream over every object under the folder prefix.
///
/// Pages are fetched lazily; continuation tokens are followed until the
/// service reports the listing complete. Listing errors surface as-is to the
/// caller and end the stream.
#[derive(Debug)]
pub(super) struct ListFolderStream {
    ctx: DownloadFolderContext,
    next_token: Option<String>,
    exhausted: bool,
    buffered: VecDeque<RemoteObject>,
}

impl ListFolderStream {
    pub(super) fn new(ctx: DownloadFolderContext) -> Self {
        Self {
            ctx,
            next_token: None,
            exhausted: false,
            buffered: VecDeque::new(),
        }
    }

    /// The next listed object, or [None] once the listing is complete.
    pub(super) async fn next(&mut self) -> Option<Result<RemoteObject, error::Error>> {
        loop {
            if let Some(object) = self.buffered.pop_front() {
                return Some(Ok(object));
            }

            if self.exhausted {
                return None;
            }

            if let Err(err) = self.next_page().await {
                self.exhausted = true;
                return Some(Err(err));
            }
        }
    }

    async fn next_page(&mut self) -> Result<(), error::Error> {
        let input = &self.ctx.state().input;
        let container = input.container().expect("container set");
        let prefix = input.prefix();

        let resp = self
            .ctx
            .client()
            .list_objects_v2()
            .bucket(container)
            .set_prefix(prefix.map(str::to_owned))
            .set_continuation_token(self.next_token.take())
            .send()
            .await?;

        self.next_token = resp.next_continuation_token().map(str::to_owned);
        self.exhausted = !(resp.is_truncated().unwrap_or(false) && self.next_token.is_some());

        for obj in resp.contents() {
            // keyless entries cannot be downloaded
            let Some(key) = obj.key() else { continue };
            let name = strip_key_prefix(key, prefix).to_owned();
            let size_bytes: u64 = obj
                .size()
                .unwrap_or_default()
                .try_into()
                .unwrap_or_default();
            self.buffered
                .push_back(RemoteObject::new(container, key, name, size_bytes));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
    use aws_smithy_mocks_experimental::{mock, mock_client, RuleMode};

    use crate::operation::download_folder::{DownloadFolderContext, DownloadFolderInput};

    use super::ListFolderStream;

    fn obj(key: &str, size: i64) -> aws_sdk_s3::types::Object {
        aws_sdk_s3::types::Object::builder().key(key).size(size).build()
    }

    fn stream_for(client: aws_sdk_s3::Client, prefix: Option<&str>) -> ListFolderStream {
        let config = crate::Config::builder().client(client).build();
        let client = crate::Client::new(config);
        let mut builder = DownloadFolderInput::builder()
            .container("test-container")
            .destination("/tmp/test");
        if let Some(prefix) = prefix {
            builder = builder.prefix(prefix);
        }
        let input = builder.build().unwrap();
        let ctx =
            DownloadFolderContext::new(client.handle.clone(), input, "/tmp/test".into());
        ListFolderStream::new(ctx)
    }

    #[tokio::test]
    async fn test_follows_continuation_tokens() {
        let page1 = mock!(aws_sdk_s3::Client::list_objects_v2).then_output(|| {
            ListObjectsV2Output::builder()
                .is_truncated(true)
                .next_continuation_token("token1")
                .contents(obj("photos/a.png", 5))
                .contents(obj("photos/b.png", 7))
                .build()
        });
        let page2 = mock!(aws_sdk_s3::Client::list_objects_v2)
            .match_requests(|r| r.continuation_token() == Some("token1"))
            .then_output(|| {
                ListObjectsV2Output::builder()
                    .is_truncated(false)
                    .contents(obj("photos/c.png", 9))
                    .build()
            });

        let rules = vec![page1, page2];
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, rules.as_slice());
        let mut stream = stream_for(client, Some("photos/"));

        let mut names = Vec::new();
        while let Some(object) = stream.next().await {
            names.push(object.unwrap().name().to_owned());
        }

        assert_eq!(vec!["a.png", "b.png", "c.png"], names);
    }

    #[tokio::test]
    async fn test_names_relative_to_prefix() {
        let list_rule = mock!(aws_sdk_s3::Client::list_objects_v2).then_output(|| {
            ListObjectsV2Output::builder()
                .contents(obj("notes/2024/summary.txt", 3))
                .contents(obj("notes/2024/drafts/wip.txt", 4))
                .build()
        });

        let rules = vec![list_rule];
        let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, rules.as_slice());
        let mut stream = stream_for(client, Some("notes/2024/"));

        let mut objects = Vec::new();
        while let Some(object) = stream.next().await {
            objects.push(object.unwrap());
        }

        let names: Vec<&str> = objects.iter().map(|o| o.name()).collect();
        assert_eq!(vec!["summary.txt", "drafts/wip.txt"], names);
        assert_eq!("notes/2024/summary.txt", objects[0].key());
        assert_eq!("test-container", objects[0].container());
    }
}
