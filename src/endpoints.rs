//! API 1.1 endpoints.
//!
//! https://dev.twitter.com/docs/api/1.1

use std::path::PathBuf;

use crate::{Client, List, Map, MultipartBody, Params, RequestDescriptor, Result};

fn single(key: &str, value: &str) -> Params {
    let mut params = Params::new();
    params.set(key, value);
    params
}

impl Client {
    fn get<T: serde::de::DeserializeOwned>(&self, path: &str, params: Params) -> Result<T> {
        self.execute(RequestDescriptor::get(path).query(params))
    }

    fn post<T: serde::de::DeserializeOwned>(&self, path: &str, params: Params) -> Result<T> {
        self.execute(RequestDescriptor::post(path).form(params))
    }

    /// Returns a representation of the requesting user if authentication was
    /// successful; a 401 [`Error::Provider`](crate::Error::Provider) if not.
    ///
    /// https://dev.twitter.com/docs/api/1.1/get/account/verify_credentials
    pub fn verify_credentials(&self, params: Params) -> Result<Map> {
        self.get("account/verify_credentials", params)
    }

    /// Most recent Tweets and retweets posted by the authenticating user and
    /// the users they follow.
    ///
    /// https://dev.twitter.com/docs/api/1.1/get/statuses/home_timeline
    pub fn home_timeline(&self, params: Params) -> Result<List> {
        self.get("statuses/home_timeline", params)
    }

    /// https://dev.twitter.com/docs/api/1.1/get/statuses/mentions_timeline
    pub fn mentions_timeline(&self, params: Params) -> Result<List> {
        self.get("statuses/mentions_timeline", params)
    }

    /// Tweets posted by the user given by `screen_name` or `user_id`.
    ///
    /// https://dev.twitter.com/docs/api/1.1/get/statuses/user_timeline
    pub fn user_timeline(&self, params: Params) -> Result<List> {
        self.get("statuses/user_timeline", params)
    }

    /// https://dev.twitter.com/docs/api/1.1/get/statuses/retweets_of_me
    pub fn retweets_of_me(&self, params: Params) -> Result<List> {
        self.get("statuses/retweets_of_me", params)
    }

    /// Up to 100 of the first retweets of tweet `id`.
    ///
    /// https://dev.twitter.com/docs/api/1.1/get/statuses/retweets/%3Aid
    pub fn retweets(&self, id: u64, params: Params) -> Result<List> {
        self.get(&format!("statuses/retweets/{}", id), params)
    }

    /// https://dev.twitter.com/docs/api/1.1/get/statuses/show/%3Aid
    pub fn show(&self, id: u64, params: Params) -> Result<Map> {
        self.get(&format!("statuses/show/{}", id), params)
    }

    /// https://dev.twitter.com/docs/api/1.1/post/statuses/destroy/%3Aid
    pub fn destroy(&self, id: u64, params: Params) -> Result<Map> {
        self.post(&format!("statuses/destroy/{}", id), params)
    }

    /// https://dev.twitter.com/docs/api/1.1/post/statuses/retweet/%3Aid
    pub fn retweet(&self, id: u64, params: Params) -> Result<Map> {
        self.post(&format!("statuses/retweet/{}", id), params)
    }

    /// Tweets `status`. `params` may override any field, `status` included.
    ///
    /// https://dev.twitter.com/docs/api/1.1/post/statuses/update
    pub fn update(&self, status: &str, params: Params) -> Result<Map> {
        self.post("statuses/update", single("status", status).merge(params))
    }

    /// Tweets `status` with `files` attached as `media[]` parts.
    ///
    /// https://dev.twitter.com/docs/api/1.1/post/statuses/update_with_media
    pub fn update_with_media<I, P>(&self, status: &str, params: Params, files: I) -> Result<Map>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let body = MultipartBody::new()
            .files(files)
            .fields(single("status", status).merge(params));
        self.execute(RequestDescriptor::post("statuses/update_with_media").multipart(body))
    }

    /// https://dev.twitter.com/docs/api/1.1/get/statuses/oembed
    pub fn oembed(&self, params: Params) -> Result<Map> {
        self.get("statuses/oembed", params)
    }

    /// https://dev.twitter.com/docs/api/1.1/get/search/tweets
    pub fn search(&self, params: Params) -> Result<Map> {
        self.get("search/tweets", params)
    }

    /// Cursored IDs of every user the given user follows.
    ///
    /// https://dev.twitter.com/docs/api/1.1/get/friends/ids
    pub fn friends(&self, params: Params) -> Result<Map> {
        self.get("friends/ids", params)
    }

    /// Cursored IDs of every user following the given user.
    ///
    /// https://dev.twitter.com/docs/api/1.1/get/followers/ids
    pub fn followers(&self, params: Params) -> Result<Map> {
        self.get("followers/ids", params)
    }

    /// Up to 100 users by comma-separated `user_id` and/or `screen_name`.
    ///
    /// https://dev.twitter.com/docs/api/1.1/get/users/lookup
    pub fn lookup_users(&self, params: Params) -> Result<List> {
        self.get("users/lookup", params)
    }

    /// https://dev.twitter.com/docs/api/1.1/get/users/show
    pub fn show_user(&self, params: Params) -> Result<Map> {
        self.get("users/show", params)
    }
}
