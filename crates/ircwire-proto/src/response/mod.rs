//! Numeric reply codes.
//!
//! The table covers RFC 2812 plus a few network extensions servers commonly
//! send during registration (330, 378, 479). Codes outside the table are
//! carried as [`Command::OtherNumeric`](crate::Command::OtherNumeric).
//!
//! # Reference
//! - RFC 2812 Section 5: Replies

#![allow(non_camel_case_types)]

mod helpers;

pub use helpers::ParseResponseError;

macro_rules! responses {
    ($( $(#[$doc:meta])* $name:ident = $code:literal, )*) => {
        /// A known numeric reply.
        ///
        /// Replies below 400 report results, 400 and above report errors.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u16)]
        #[non_exhaustive]
        pub enum Response {
            $( $(#[$doc])* $name = $code, )*
        }

        impl Response {
            /// Looks up a numeric code.
            pub fn from_code(code: u16) -> Option<Response> {
                match code {
                    $( $code => Some(Response::$name), )*
                    _ => None,
                }
            }
        }
    };
}

responses! {
    // === Registration ===
    /// 001
    RPL_WELCOME = 1,
    /// 002
    RPL_YOURHOST = 2,
    /// 003
    RPL_CREATED = 3,
    /// 004
    RPL_MYINFO = 4,
    /// 005, nowadays mostly ISUPPORT
    RPL_BOUNCE = 5,

    // === Trace and stats ===
    /// 200
    RPL_TRACELINK = 200,
    /// 201
    RPL_TRACECONNECTING = 201,
    /// 202
    RPL_TRACEHANDSHAKE = 202,
    /// 203
    RPL_TRACEUNKNOWN = 203,
    /// 204
    RPL_TRACEOPERATOR = 204,
    /// 205
    RPL_TRACEUSER = 205,
    /// 206
    RPL_TRACESERVER = 206,
    /// 207
    RPL_TRACESERVICE = 207,
    /// 208
    RPL_TRACENEWTYPE = 208,
    /// 209
    RPL_TRACECLASS = 209,
    /// 210
    RPL_TRACERECONNECT = 210,
    /// 211
    RPL_STATSLINKINFO = 211,
    /// 212
    RPL_STATSCOMMANDS = 212,
    /// 219
    RPL_ENDOFSTATS = 219,
    /// 221
    RPL_UMODEIS = 221,
    /// 234
    RPL_SERVLIST = 234,
    /// 235
    RPL_SERVLISTEND = 235,
    /// 242
    RPL_STATSUPTIME = 242,
    /// 243
    RPL_STATSOLINE = 243,
    /// 251
    RPL_LUSERCLIENT = 251,
    /// 252
    RPL_LUSEROP = 252,
    /// 253
    RPL_LUSERUNKNOWN = 253,
    /// 254
    RPL_LUSERCHANNELS = 254,
    /// 255
    RPL_LUSERME = 255,
    /// 256
    RPL_ADMINME = 256,
    /// 257
    RPL_ADMINLOC1 = 257,
    /// 258
    RPL_ADMINLOC2 = 258,
    /// 259
    RPL_ADMINEMAIL = 259,
    /// 261
    RPL_TRACELOG = 261,
    /// 262
    RPL_TRACEEND = 262,
    /// 263
    RPL_TRYAGAIN = 263,

    // === Command replies ===
    /// 301
    RPL_AWAY = 301,
    /// 302
    RPL_USERHOST = 302,
    /// 303
    RPL_ISON = 303,
    /// 305
    RPL_UNAWAY = 305,
    /// 306
    RPL_NOWAWAY = 306,
    /// 311
    RPL_WHOISUSER = 311,
    /// 312
    RPL_WHOISSERVER = 312,
    /// 313
    RPL_WHOISOPERATOR = 313,
    /// 314
    RPL_WHOWASUSER = 314,
    /// 315
    RPL_ENDOFWHO = 315,
    /// 317
    RPL_WHOISIDLE = 317,
    /// 318
    RPL_ENDOFWHOIS = 318,
    /// 319
    RPL_WHOISCHANNELS = 319,
    /// 321, obsolete
    RPL_LISTSTART = 321,
    /// 322
    RPL_LIST = 322,
    /// 323
    RPL_LISTEND = 323,
    /// 324
    RPL_CHANNELMODEIS = 324,
    /// 325
    RPL_UNIQOPIS = 325,
    /// 330 "is logged in as" (Freenode)
    RPL_WHOISACCOUNT = 330,
    /// 331
    RPL_NOTOPIC = 331,
    /// 332 `<me> <channel> :<topic>`
    RPL_TOPIC = 332,
    /// 341
    RPL_INVITING = 341,
    /// 342
    RPL_SUMMONING = 342,
    /// 346
    RPL_INVITELIST = 346,
    /// 347
    RPL_ENDOFINVITELIST = 347,
    /// 348
    RPL_EXCEPTLIST = 348,
    /// 349
    RPL_ENDOFEXCEPTLIST = 349,
    /// 351
    RPL_VERSION = 351,
    /// 352
    RPL_WHOREPLY = 352,
    /// 353
    RPL_NAMREPLY = 353,
    /// 364
    RPL_LINKS = 364,
    /// 365
    RPL_ENDOFLINKS = 365,
    /// 366
    RPL_ENDOFNAMES = 366,
    /// 367
    RPL_BANLIST = 367,
    /// 368
    RPL_ENDOFBANLIST = 368,
    /// 369
    RPL_ENDOFWHOWAS = 369,
    /// 371
    RPL_INFO = 371,
    /// 372, one line of the message of the day
    RPL_MOTD = 372,
    /// 374
    RPL_ENDOFINFO = 374,
    /// 375
    RPL_MOTDSTART = 375,
    /// 376
    RPL_ENDOFMOTD = 376,
    /// 378 "is connecting from" (Freenode)
    RPL_WHOISHOST = 378,
    /// 381
    RPL_YOUREOPER = 381,
    /// 382
    RPL_REHASHING = 382,
    /// 383
    RPL_YOURESERVICE = 383,
    /// 391
    RPL_TIME = 391,
    /// 392
    RPL_USERSSTART = 392,
    /// 393
    RPL_USERS = 393,
    /// 394
    RPL_ENDOFUSERS = 394,
    /// 395
    RPL_NOUSERS = 395,

    // === Errors ===
    /// 401
    ERR_NOSUCHNICK = 401,
    /// 402
    ERR_NOSUCHSERVER = 402,
    /// 403
    ERR_NOSUCHCHANNEL = 403,
    /// 404
    ERR_CANNOTSENDTOCHAN = 404,
    /// 405
    ERR_TOOMANYCHANNELS = 405,
    /// 406
    ERR_WASNOSUCHNICK = 406,
    /// 407
    ERR_TOOMANYTARGETS = 407,
    /// 408
    ERR_NOSUCHSERVICE = 408,
    /// 409
    ERR_NOORIGIN = 409,
    /// 410 (IRCv3)
    ERR_INVALIDCAPCMD = 410,
    /// 411
    ERR_NORECIPIENT = 411,
    /// 412
    ERR_NOTEXTTOSEND = 412,
    /// 413
    ERR_NOTOPLEVEL = 413,
    /// 414
    ERR_WILDTOPLEVEL = 414,
    /// 415
    ERR_BADMASK = 415,
    /// 421
    ERR_UNKNOWNCOMMAND = 421,
    /// 422
    ERR_NOMOTD = 422,
    /// 423
    ERR_NOADMININFO = 423,
    /// 424
    ERR_FILEERROR = 424,
    /// 431
    ERR_NONICKNAMEGIVEN = 431,
    /// 432
    ERR_ERRONEUSNICKNAME = 432,
    /// 433
    ERR_NICKNAMEINUSE = 433,
    /// 436
    ERR_NICKCOLLISION = 436,
    /// 437
    ERR_UNAVAILRESOURCE = 437,
    /// 441
    ERR_USERNOTINCHANNEL = 441,
    /// 442
    ERR_NOTONCHANNEL = 442,
    /// 443
    ERR_USERONCHANNEL = 443,
    /// 444
    ERR_NOLOGIN = 444,
    /// 445
    ERR_SUMMONDISABLED = 445,
    /// 446
    ERR_USERSDISABLED = 446,
    /// 451
    ERR_NOTREGISTERED = 451,
    /// 461
    ERR_NEEDMOREPARAMS = 461,
    /// 462
    ERR_ALREADYREGISTERED = 462,
    /// 463
    ERR_NOPERMFORHOST = 463,
    /// 464
    ERR_PASSWDMISMATCH = 464,
    /// 465
    ERR_YOUREBANNEDCREEP = 465,
    /// 466
    ERR_YOUWILLBEBANNED = 466,
    /// 467
    ERR_KEYSET = 467,
    /// 471
    ERR_CHANNELISFULL = 471,
    /// 472
    ERR_UNKNOWNMODE = 472,
    /// 473
    ERR_INVITEONLYCHAN = 473,
    /// 474
    ERR_BANNEDFROMCHAN = 474,
    /// 475
    ERR_BADCHANNELKEY = 475,
    /// 476
    ERR_BADCHANMASK = 476,
    /// 477
    ERR_NOCHANMODES = 477,
    /// 478
    ERR_BANLISTFULL = 478,
    /// 479 illegal channel name (Freenode)
    ERR_BADCHANNAME = 479,
    /// 481
    ERR_NOPRIVILEGES = 481,
    /// 482
    ERR_CHANOPRIVSNEEDED = 482,
    /// 483
    ERR_CANTKILLSERVER = 483,
    /// 484
    ERR_RESTRICTED = 484,
    /// 485
    ERR_UNIQOPPRIVSNEEDED = 485,
    /// 491
    ERR_NOOPERHOST = 491,
    /// 501
    ERR_UMODEUNKNOWNFLAG = 501,
    /// 502
    ERR_USERSDONTMATCH = 502,
}
