mod helpers;
mod misc;
mod mocks;
mod webhooks;
